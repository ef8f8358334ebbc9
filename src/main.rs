use std::sync::Arc;

use carescout::api::create_router;
use carescout::config::Config;
use carescout::dispatcher::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    let dispatcher = Arc::new(Dispatcher::new(&config));

    let app = create_router(dispatcher);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("carescout listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
