#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use rpg_odyssey::core::config::Config;
    use rpg_odyssey::services::api::{routes, AppState};
    use rpg_odyssey::services::characters::CharacterGenerator;
    use rpg_odyssey::services::llm::create_llm;
    use std::sync::Arc;

    env_logger::init();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Please ensure 'config.yml' exists with valid LLM settings.");
            return Err(e);
        }
    };

    let llm = create_llm(&config.llm)?;
    let generator = CharacterGenerator::new(Arc::from(llm), config.generation.clone());
    let app = routes(AppState::new(generator));

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    log::info!(
        "Character service listening on http://{} (provider: {}, fallback: {})",
        config.server.bind,
        config.llm.provider,
        config.generation.fallback
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
