//! Wiring & DI. Entry point: load config, pick strategies, serve HTTP.
//! No business logic here; generation lives behind the LessonGenerator port.

use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tutor_forge::adapters::ai::model_from_config;
use tutor_forge::adapters::http::{AppState, ENDPOINTS, build_router};
use tutor_forge::adapters::speech::transcriber_from_config;
use tutor_forge::adapters::ui::{BannerInfo, print_welcome};
use tutor_forge::shared::config::AppConfig;
use tutor_forge::usecases::{TokenBudgets, select_lesson_generator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Strategies: live when a credential is configured, mock otherwise ---
    let model = model_from_config(&cfg).map_err(|e| anyhow::anyhow!("{}", e))?;
    if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            timeout_secs = cfg.ai_timeout_secs_or_default(),
            "text model configured"
        );
    }
    let budgets = TokenBudgets {
        outline: cfg.outline_max_tokens_or_default(),
        slides: cfg.slides_max_tokens_or_default(),
    };
    let generator = select_lesson_generator(model, budgets);
    let transcriber = transcriber_from_config(&cfg).map_err(|e| anyhow::anyhow!("{}", e))?;

    let environment = cfg.environment_or_default();
    let state = AppState::new(
        generator.clone(),
        transcriber.clone(),
        environment.clone(),
        cfg.max_upload_bytes_or_default(),
    );
    let app = build_router(state);

    let address = format!("{}:{}", cfg.host_or_default(), cfg.port_or_default());
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", address, e))?;

    print_welcome(&BannerInfo {
        address: &address,
        environment: &environment,
        generator: generator.strategy(),
        transcriber: transcriber.strategy(),
        endpoints: &ENDPOINTS,
    });
    info!(address = %address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server closed");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received: closing HTTP server"),
        _ = terminate => info!("SIGTERM received: closing HTTP server"),
    }
}
