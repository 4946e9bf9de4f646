pub mod catalog;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod io;
pub mod models;
pub mod state;
