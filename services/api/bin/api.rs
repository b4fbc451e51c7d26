//! Main Entrypoint for the Aula API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the teaching corpus and the prompt templates.
//! 3. Initializing the completion client and the domain services.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use aula_api::{config::Config, router::create_router, state::AppState};
use aula_core::{
    corpus::load_corpus,
    coverage::SubstringCoverage,
    llm_client::{CompletionClient, OpenAICompatibleClient},
    prompt::PromptLibrary,
    relay::AnswerRelay,
    review::ReviewEngine,
    session::InMemorySessionStore,
};
use std::{collections::HashMap, fs, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// A helper function to load prompt-template overrides from a directory.
fn load_prompt_overrides(
    prompts_path: &std::path::Path,
) -> anyhow::Result<HashMap<String, String>> {
    let mut overrides = HashMap::new();
    for entry in std::fs::read_dir(prompts_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            overrides.insert(prompt_key, content);
        }
    }
    Ok(overrides)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load the Teaching Corpus ---
    // Loaded once and shared read-only for the process lifetime. A missing
    // corpus directory is fatal here; an empty one is only worth a warning.
    let corpus = load_corpus(&config.corpus_dir)
        .with_context(|| format!("Failed to load corpus from {}", config.corpus_dir.display()))?;
    if corpus.is_empty() {
        warn!(dir = %config.corpus_dir.display(), "Corpus directory contains no readable documents.");
    } else {
        info!(bytes = corpus.len(), "Teaching corpus loaded.");
    }
    let corpus = Arc::new(corpus);

    // --- 4. Load Prompt Templates ---
    let mut prompts = PromptLibrary::builtin();
    if let Some(path) = &config.prompts_path {
        let overrides = load_prompt_overrides(path)
            .with_context(|| format!("Failed to load prompts from {}", path.display()))?;
        info!(count = overrides.len(), "Applying prompt overrides.");
        prompts.apply_overrides(overrides);
    }

    // --- 5. Initialize the Completion Client ---
    let api_key = match config.api_key() {
        Some(key) => key.to_string(),
        None => {
            warn!(
                provider = ?config.provider,
                "No API credential configured; completion calls will fail until one is provided."
            );
            String::new()
        }
    };
    let openai_config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(config.api_base());
    let oracle: Arc<dyn CompletionClient> = Arc::new(OpenAICompatibleClient::new(
        openai_config,
        config.chat_model.clone(),
        config.oracle_timeout,
    ));

    // --- 6. Assemble the Domain Services ---
    let engine = ReviewEngine::new(
        Arc::new(InMemorySessionStore::new()),
        oracle.clone(),
        Arc::new(SubstringCoverage),
        prompts.clone(),
        corpus.clone(),
    );
    let relay = AnswerRelay::new(oracle, prompts, corpus);
    let app_state = Arc::new(AppState {
        relay: Arc::new(relay),
        engine: Arc::new(engine),
        config: Arc::new(config.clone()),
    });

    // --- 7. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 8. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
