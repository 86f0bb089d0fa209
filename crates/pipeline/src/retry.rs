use tracing::{error, info, warn};

use glint_core::config::DeliveryConfig;
use glint_core::domain::submission::FailedQueueEntry;
use glint_delivery::Dispatcher;
use glint_store::FailureQueue;

/// Aggregate outcome of one operator-triggered retry pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryReport {
    pub succeeded: usize,
    pub total: usize,
    pub remaining: Vec<FailedQueueEntry>,
}

pub struct RetryController {
    dispatcher: Dispatcher,
    queue: FailureQueue,
    endpoints: DeliveryConfig,
}

impl RetryController {
    pub fn new(dispatcher: Dispatcher, queue: FailureQueue, endpoints: DeliveryConfig) -> Self {
        Self { dispatcher, queue, endpoints }
    }

    /// Re-attempts every queued entry, strictly one at a time in queue order.
    /// Each success is removed from the durable queue immediately, so a
    /// concurrent pass cannot re-deliver what this one already sent.
    pub async fn retry_all(&self) -> RetryReport {
        let snapshot = self.queue.list().await;
        let total = snapshot.len();
        let mut succeeded = 0;

        for entry in snapshot {
            let endpoint = self.endpoints.endpoint_for(entry.service_type);
            let result = self.dispatcher.send(endpoint, &entry.submission.payload).await;

            if result.success {
                succeeded += 1;
                if let Err(remove_error) = self.queue.remove(&entry.submission.id).await {
                    error!(
                        event_name = "retry.remove_failed",
                        reference_id = %entry.submission.reference_id,
                        error = %remove_error,
                        "entry delivered on retry but could not be removed; it may retry again"
                    );
                } else {
                    info!(
                        event_name = "retry.entry_delivered",
                        reference_id = %entry.submission.reference_id,
                        "queued submission delivered on retry"
                    );
                }
            } else {
                warn!(
                    event_name = "retry.entry_failed",
                    reference_id = %entry.submission.reference_id,
                    error = result.error.as_deref().unwrap_or("delivery failed"),
                    "queued submission failed again; left in place"
                );
            }
        }

        let remaining = self.queue.list().await;
        info!(
            event_name = "retry.pass_complete",
            succeeded,
            total,
            remaining = remaining.len(),
            "retry pass complete"
        );

        RetryReport { succeeded, total, remaining }
    }
}
