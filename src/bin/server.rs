use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookme_engine::{
    server::{router, AppState},
    AppConfig, Catalog, RecommendationEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookme_server=debug,bookme_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("🚀 Starting BookMe Server");
    tracing::info!("📦 Books: {}", config.books_path.display());
    tracing::info!("🔌 Port: {}", config.port);

    let catalog = Catalog::load(&config.books_path)?;
    let engine = RecommendationEngine::new(catalog);

    let port = config.port;
    let app = router(AppState::new(engine, config));

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("📚 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
