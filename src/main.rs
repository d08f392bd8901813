use ticket_console::{build_router, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("🌐 Ticketing API: {}", config.api_base_url);

    let addr = config.bind_address();
    let app = build_router(AppState::new(config));

    tracing::info!("🚀 Server starting on {}", addr);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}
