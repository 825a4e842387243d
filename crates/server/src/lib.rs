pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use downloader::DownloadQueueClient;
use rss::RssClient;
use telegram::TelegramClient;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use utoipa_scalar::{Scalar, Servable};

pub use api::create_router;
pub use config::{Config, Environment};
pub use db::create_pool;
pub use error::{AppError, AppResult};
pub use services::SettingsService;
pub use state::AppState;

use crate::models::Settings;
use crate::repositories::SqliteTrackedStore;
use crate::services::{
    DestinationRule, QueueDispatcher, ReconcileJob, ReconcileOptions, ReconcileService,
    SchedulerService, SystemClock,
};

pub async fn run_server(
    addr: SocketAddr,
    env: Environment,
    data_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new(env, addr.port(), data_path);

    // Ensure data directory exists
    std::fs::create_dir_all(&config.data_path)?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;

    let settings = SettingsService::new(&config).await?;
    let settings = settings.get();
    tracing::info!("Loaded settings from {}", config.settings_path().display());

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http.timeout_secs))
        .build()?;

    let store = Arc::new(SqliteTrackedStore::new(pool));
    let reconcile = Arc::new(build_reconcile_service(&settings, http, store.clone()));

    // A zero interval would make tokio's timer panic
    let interval = Duration::from_secs(settings.reconcile.interval_secs.max(1));
    let token = CancellationToken::new();
    let scheduler = SchedulerService::new().with_job(ReconcileJob::new(reconcile, interval));
    let jobs = scheduler.start(token.clone());
    tracing::info!(
        "Reconcile loop started, ticking every {}s",
        interval.as_secs()
    );

    let (router, api) = create_router(AppState::new(store));
    let app = router
        .merge(Scalar::with_url("/docs", api))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(token.clone()))
    .await?;

    token.cancel();
    for job in jobs {
        if let Err(e) = job.await {
            tracing::warn!("Scheduler task ended abnormally: {}", e);
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_reconcile_service(
    settings: &Settings,
    http: reqwest::Client,
    store: Arc<SqliteTrackedStore>,
) -> ReconcileService {
    let notifier = if settings.telegram.is_enabled() {
        Some(TelegramClient::with_api_url(
            http.clone(),
            &settings.telegram.api_url,
            &settings.telegram.bot_token,
            settings.telegram.chat_id,
        ))
    } else {
        tracing::info!("Telegram bot token not set, notifications disabled");
        None
    };

    let dispatcher = QueueDispatcher::new(
        DownloadQueueClient::new(http.clone(), &settings.downloader.url),
        notifier,
        DestinationRule::from(&settings.paths),
    );

    ReconcileService::new(
        store,
        Arc::new(RssClient::with_client(http)),
        Arc::new(dispatcher),
        Arc::new(SystemClock),
        ReconcileOptions::from(settings),
    )
}

/// Resolves on Ctrl-C and cancels the background jobs
async fn shutdown_signal(token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving until the jobs are cancelled some other way
        token.cancelled().await;
        return;
    }

    tracing::info!("Shutdown signal received");
    token.cancel();
}
