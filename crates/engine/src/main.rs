//! Growing Together Engine - Main entry point.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use growtogether_engine::{
    api,
    infrastructure::{
        chat_completions::ChatCompletionsClient,
        clock::SystemClock,
        config::AppConfig,
        ports::{ClockPort, ContentProvider, LlmPort, VoicePort},
        speech::{SilentVoice, SpeechClient, VoiceClipStore},
    },
    use_cases::LlmContentProvider,
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "growtogether_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Growing Together Engine");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Content generation
    let llm_client = ChatCompletionsClient::with_timeout(
        &config.llm_base_url,
        &config.llm_model,
        config.llm_timeout_secs,
    )
    .with_api_key(config.llm_api_key.clone());
    tracing::info!(
        base_url = %config.llm_base_url,
        model = %llm_client.model(),
        timeout_secs = config.llm_timeout_secs,
        "LLM client configured"
    );
    let llm: Arc<dyn LlmPort> = Arc::new(llm_client);
    let content: Arc<dyn ContentProvider> = Arc::new(LlmContentProvider::new(llm));

    // Voice
    let voice_clips = Arc::new(VoiceClipStore::new());
    let voice: Arc<dyn VoicePort> = match &config.speech {
        Some(speech) => {
            tracing::info!(base_url = %speech.base_url, model = %speech.model, "Speech synthesis enabled");
            Arc::new(
                SpeechClient::new(&speech.base_url, &speech.model, voice_clips.clone())
                    .with_api_key(speech.api_key.clone()),
            )
        }
        None => {
            tracing::info!("TTS_BASE_URL not set, voice playback disabled");
            Arc::new(SilentVoice)
        }
    };

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    // Create application
    let app = Arc::new(App::new(content, voice, clock, voice_clips));

    let mut router = api::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // JSON request bodies trigger CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
