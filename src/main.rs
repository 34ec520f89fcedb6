use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use product_catalog::{
    app::catalog::{CatalogService, ProductStore},
    cors_layer, create_app,
    infrastructure::{
        config::{Settings, StorageSettings},
        database::DatabaseManager,
        logger::Logger,
        memory_store::MemoryProductStore,
        pg_store::PgProductStore,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("invalid configuration")?;
    Logger::init(settings.log_level);

    info!("Starting product catalog ({} storage)...", settings.storage.as_str());

    let mut database = None;
    let store: Arc<dyn ProductStore> = match &settings.storage {
        StorageSettings::Memory => Arc::new(MemoryProductStore::seeded()),
        StorageSettings::Postgres {
            database_url,
            max_connections,
        } => {
            let manager = DatabaseManager::new(database_url, *max_connections)
                .await
                .context("failed to connect to database")?;
            manager
                .prepare()
                .await
                .context("failed to prepare products table")?;
            let store = PgProductStore::new(manager.get_pool().clone());
            database = Some(manager);
            Arc::new(store)
        }
    };

    let cors = cors_layer(&settings.cors_origin).context("invalid CATALOG_CORS_ORIGIN")?;
    let app = create_app(CatalogService::new(store)).layer(cors);

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!("🚀 Product catalog running on http://{}", listener.local_addr()?);
    info!("📖 Available endpoints:");
    info!("   GET    /products                 - List products");
    info!("   GET    /products/:id | /product/:id - Get product");
    info!("   POST   /products | /product       - Create product");
    info!("   PUT    /products/:id | /product?id= - Replace product");
    info!("   DELETE /products/:id | /product?id= - Delete product");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(manager) = database {
        manager.close().await;
    }

    served.map_err(|e| {
        error!("server error: {}", e);
        e
    })?;

    info!("Product catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
