use std::sync::Arc;

use serde::Serialize;

use glint_core::config::{AppConfig, LoadOptions};
use glint_delivery::{Dispatcher, HttpTransport};
use glint_pipeline::RetryController;
use glint_store::repositories::SqlKvStore;
use glint_store::{connect_with_settings, migrations, DbPool, FailureQueue};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct QueueEntryView {
    reference_id: String,
    service_type: &'static str,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct QueueListing {
    count: usize,
    entries: Vec<QueueEntryView>,
}

#[derive(Debug, Serialize)]
struct RetryOutcome {
    succeeded: usize,
    total: usize,
    remaining: usize,
}

pub fn list() -> CommandResult {
    with_queue("queue list", |queue, _| async move {
        let entries = queue.list().await;
        let listing = QueueListing {
            count: entries.len(),
            entries: entries
                .iter()
                .map(|entry| QueueEntryView {
                    reference_id: entry.submission.reference_id.clone(),
                    service_type: entry.service_type.as_str(),
                    created_at: entry.submission.created_at.to_rfc3339(),
                })
                .collect(),
        };
        serde_json::to_string(&listing).map_err(|error| error.to_string())
    })
}

pub fn retry() -> CommandResult {
    with_queue("queue retry", |queue, config| async move {
        let transport = HttpTransport::new(config.delivery.timeout_secs)
            .map_err(|error| format!("http client init failed: {error}"))?;
        let controller = RetryController::new(
            Dispatcher::new(Arc::new(transport)),
            queue,
            config.delivery.clone(),
        );

        let report = controller.retry_all().await;
        let outcome = RetryOutcome {
            succeeded: report.succeeded,
            total: report.total,
            remaining: report.remaining.len(),
        };
        serde_json::to_string(&outcome).map_err(|error| error.to_string())
    })
}

pub fn clear() -> CommandResult {
    with_queue("queue clear", |queue, _| async move {
        queue.clear().await.map_err(|error| error.to_string())?;
        Ok("failed-submission queue cleared".to_string())
    })
}

/// Shared scaffolding: load config, bring up a runtime and the database, hand
/// the durable queue to the command body, and map failures onto exit codes.
fn with_queue<F, Fut>(command: &str, body: F) -> CommandResult
where
    F: FnOnce(FailureQueue, AppConfig) -> Fut,
    Fut: std::future::Future<Output = Result<String, String>>,
{
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                command,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_pool(&config).await.map_err(|error| ("db_connectivity", error, 4u8))?;
        let queue = FailureQueue::new(Arc::new(SqlKvStore::new(pool.clone())));

        let output = body(queue, config).await.map_err(|error| ("command", error, 5u8));
        pool.close().await;
        output
    });

    match result {
        Ok(message) => CommandResult::success(command, message),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure(command, error_class, message, exit_code)
        }
    }
}

async fn connect_pool(config: &AppConfig) -> Result<DbPool, String> {
    let pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(|error| error.to_string())?;

    migrations::run_pending(&pool).await.map_err(|error| error.to_string())?;
    Ok(pool)
}
