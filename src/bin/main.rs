use std::net::SocketAddr;

use academic_records::bootstrap::initialize_system_data;
use academic_records::database::get_database_connection;
use academic_records::state::AppState;
use academic_records::{app, config::Config, utils::tracing::init_standard_tracing};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    tracing::info!("Starting application...");

    let db = get_database_connection(&config).await?;

    initialize_system_data(&db, &config)
        .await
        .context("Failed to initialize system data")?;

    let http_address = format!("0.0.0.0:{}", config.port);
    let app = app::create_app(AppState::new(db, config));

    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}
