use ticket_bridge::config::load_config;
use ticket_bridge::create_app;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let (_state, app) = create_app(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "ticket-bridge listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
