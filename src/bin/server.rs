//! Dobby HTTP server binary.
//!
//! Configuration comes from the environment; see [`dobby::config`] for the
//! full list. `RUST_LOG` controls the tracing filter (default
//! `info,dobby=debug`).
//!
//! # Usage
//!
//! ```bash
//! GOOGLE_AI_API_KEY=... cargo run --bin dobby-server
//! # fallback answers only:
//! DOBBY_PROVIDER=none cargo run --bin dobby-server
//! ```

use anyhow::Context;
use dobby::config::ProviderKind;
use dobby::server::{app_router, AppState};
use dobby::{Dobby, DobbyConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dobby=debug".into()),
        )
        .init();

    let config = DobbyConfig::from_env().context("invalid configuration")?;
    let bind_addr = config.bind_addr();

    let dobby = Dobby::from_config(&config);
    match dobby.live_provider() {
        Some(provider) => tracing::info!(provider, "Live model enabled"),
        None if config.provider == ProviderKind::Disabled => {
            tracing::info!("Live model disabled, answering from fallback engine")
        }
        None => tracing::warn!(
            "No API key set for the configured provider, answering from fallback engine"
        ),
    }

    let app = app_router(AppState::new(dobby));

    tracing::info!("dobby server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health   — liveness probe");
    tracing::info!("  POST /api/chat — ask Dobby");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
