mod api;
mod middleware;

use std::sync::Arc;

use locinsight_analysis::{AnalysisSettings, StoreRepository};
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = locinsight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let provinces = locinsight_core::load_provinces(&config.provinces_path)?;
    tracing::info!(
        env = %config.env,
        provinces = provinces.len(),
        dataset = %config.dataset_path.display(),
        "starting locinsight server"
    );

    let repository = Arc::new(RwLock::new(StoreRepository::new()));
    spawn_dataset_load(Arc::clone(&repository), config.dataset_path.clone());

    let state = AppState {
        repository,
        provinces: Arc::new(provinces),
        settings: AnalysisSettings::from_app_config(&config),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Reads the dataset in the background; routes answer with zero stores until it lands.
fn spawn_dataset_load(repository: Arc<RwLock<StoreRepository>>, path: std::path::PathBuf) {
    tokio::spawn(async move {
        let result = StoreRepository::fetch(&path).await;
        repository.write().await.complete_load(result);
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
