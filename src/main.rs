// src/main.rs

use dotenvy::dotenv;
use edutrack::config::Config;
use edutrack::routes;
use edutrack::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Initialize Tracing (Logging) before the config so its warnings are kept
    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Load configuration from environment
    let config = Config::from_env();

    tracing::info!(
        "Data in {}, uploads in {}",
        config.data_dir.display(),
        config.uploads_dir.display()
    );

    let state = AppState::new(config.clone()).await?;

    // Rotate the classroom QR token for the lifetime of the process
    let _rotation = state.qr.spawn_rotation(config.qr_rotation);
    tracing::info!("QR token rotates every {}s", config.qr_rotation.as_secs());

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("EduTrack listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
