use async_trait::async_trait;

/// What the notification collaborators (SMS, chat, analytics) get to see
/// after a dispatch settles. They never influence the pipeline's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchNotice {
    pub reference_id: String,
    pub service_type: String,
    pub delivered: bool,
    pub error: Option<String>,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notice: DispatchNotice);
}

#[derive(Default)]
pub struct NoopNotificationSink;

#[async_trait]
impl NotificationSink for NoopNotificationSink {
    async fn notify(&self, _notice: DispatchNotice) {}
}
