#[cfg(not(target_arch = "wasm32"))]
pub mod api;
pub mod characters;
pub mod client;
pub mod guard;
pub mod llm;
pub mod wizard;
