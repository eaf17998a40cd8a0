use rusty_library_catalog::{
    adapters::{
        memory::{BookRepository as MemoryBookRepository, LoanRepository as MemoryLoanRepository},
        postgres::{PostgresBookRepository, PostgresLoanRepository},
    },
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::{AppConfig, StorageKind},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize adapters
    let service_deps = match config.storage {
        StorageKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");

            ServiceDependencies::new(
                Arc::new(PostgresBookRepository::new(pool.clone())),
                Arc::new(PostgresLoanRepository::new(pool)),
            )
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, data will not survive a restart");
            ServiceDependencies::new(
                Arc::new(MemoryBookRepository::new()),
                Arc::new(MemoryLoanRepository::new()),
            )
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
