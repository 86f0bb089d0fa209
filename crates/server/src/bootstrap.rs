use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use glint_core::config::{AppConfig, ConfigError, LoadOptions};
use glint_delivery::{Dispatcher, HttpTransport, NoopNotificationSink};
use glint_pipeline::{RetryController, SubmissionService};
use glint_store::repositories::{SqlKvStore, SqlSubmissionLog};
use glint_store::{connect_with_settings, migrations, DbPool, DraftStore, FailureQueue};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub submissions: Arc<SubmissionService>,
    pub retries: Arc<RetryController>,
    pub queue: FailureQueue,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::Error),
    #[error("http client initialization failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let kv = Arc::new(SqlKvStore::new(db_pool.clone()));
    let transport =
        Arc::new(HttpTransport::new(config.delivery.timeout_secs).map_err(BootstrapError::HttpClient)?);
    let queue = FailureQueue::new(kv.clone());

    let submissions = Arc::new(SubmissionService::new(
        Dispatcher::new(transport.clone()),
        queue.clone(),
        Arc::new(SqlSubmissionLog::new(db_pool.clone())),
        DraftStore::new(kv.clone()),
        Arc::new(NoopNotificationSink),
        config.delivery.clone(),
    ));

    let retries = Arc::new(RetryController::new(
        Dispatcher::new(transport),
        queue.clone(),
        config.delivery.clone(),
    ));

    Ok(Application { config, db_pool, submissions, retries, queue })
}
