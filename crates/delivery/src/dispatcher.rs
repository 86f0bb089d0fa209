use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("endpoint could not be reached: {0}")]
    Unreachable(String),
    #[error("request could not be sent: {0}")]
    Send(String),
}

/// Outcome of one dispatch. Always returned, never raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryResult {
    pub success: bool,
    pub error: Option<String>,
}

impl DeliveryResult {
    pub fn delivered() -> Self {
        Self { success: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}

#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    /// Structured JSON POST; returns the response status code.
    async fn post_json(&self, url: &str, body: &serde_json::Value)
        -> Result<u16, TransportError>;

    /// Opaque best-effort POST whose response is deliberately not surfaced.
    async fn post_opaque(&self, url: &str, body: &str) -> Result<(), TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DeliveryTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<u16, TransportError> {
        match self.client.post(url).json(body).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(error) if error.is_connect() || error.is_timeout() => {
                Err(TransportError::Unreachable(error.to_string()))
            }
            Err(error) => Err(TransportError::Send(error.to_string())),
        }
    }

    async fn post_opaque(&self, url: &str, body: &str) -> Result<(), TransportError> {
        self.client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body.to_owned())
            .send()
            .await
            .map(|_| ())
            .map_err(|error| TransportError::Send(error.to_string()))
    }
}

pub struct Dispatcher {
    transport: Arc<dyn DeliveryTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn DeliveryTransport>) -> Self {
        Self { transport }
    }

    /// One delivery attempt. Retry policy belongs to the caller; this method
    /// only ever degrades from structured to opaque within a single attempt.
    pub async fn send(&self, endpoint: &str, payload: &serde_json::Value) -> DeliveryResult {
        match self.transport.post_json(endpoint, payload).await {
            Ok(status) if (200..300).contains(&status) => {
                debug!(
                    event_name = "delivery.sent",
                    endpoint,
                    status,
                    "submission delivered"
                );
                DeliveryResult::delivered()
            }
            Ok(status) => {
                // The endpoint answered and refused; falling back would just
                // replay a request the server already rejected.
                warn!(
                    event_name = "delivery.rejected",
                    endpoint,
                    status,
                    "endpoint rejected submission"
                );
                DeliveryResult::failed(format!("endpoint returned status {status}"))
            }
            Err(transport_error) => {
                warn!(
                    event_name = "delivery.transport_failed",
                    endpoint,
                    error = %transport_error,
                    "structured delivery failed; attempting opaque fallback"
                );
                self.send_fallback(endpoint, payload, &transport_error).await
            }
        }
    }

    async fn send_fallback(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
        transport_error: &TransportError,
    ) -> DeliveryResult {
        let body = payload.to_string();
        match self.transport.post_opaque(endpoint, &body).await {
            Ok(()) => {
                // Delivery cannot be confirmed in this mode; count it as sent
                // rather than lose the lead, and flag it for observability.
                info!(
                    event_name = "delivery.fallback_sent",
                    endpoint,
                    "submission sent via opaque fallback (unconfirmed)"
                );
                DeliveryResult::delivered()
            }
            Err(fallback_error) => {
                warn!(
                    event_name = "delivery.fallback_failed",
                    endpoint,
                    error = %fallback_error,
                    "opaque fallback failed"
                );
                DeliveryResult::failed(format!(
                    "delivery failed: {transport_error}; fallback failed: {fallback_error}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::{DeliveryTransport, Dispatcher, TransportError};

    #[derive(Default)]
    struct ScriptedTransport {
        state: Mutex<ScriptedState>,
    }

    #[derive(Default)]
    struct ScriptedState {
        json_results: VecDeque<Result<u16, TransportError>>,
        opaque_results: VecDeque<Result<(), TransportError>>,
        json_calls: usize,
        opaque_calls: usize,
    }

    impl ScriptedTransport {
        fn with_script(
            json_results: Vec<Result<u16, TransportError>>,
            opaque_results: Vec<Result<(), TransportError>>,
        ) -> Self {
            Self {
                state: Mutex::new(ScriptedState {
                    json_results: json_results.into(),
                    opaque_results: opaque_results.into(),
                    json_calls: 0,
                    opaque_calls: 0,
                }),
            }
        }

        async fn calls(&self) -> (usize, usize) {
            let state = self.state.lock().await;
            (state.json_calls, state.opaque_calls)
        }
    }

    #[async_trait::async_trait]
    impl DeliveryTransport for ScriptedTransport {
        async fn post_json(
            &self,
            _url: &str,
            _body: &serde_json::Value,
        ) -> Result<u16, TransportError> {
            let mut state = self.state.lock().await;
            state.json_calls += 1;
            state.json_results.pop_front().unwrap_or(Ok(200))
        }

        async fn post_opaque(&self, _url: &str, _body: &str) -> Result<(), TransportError> {
            let mut state = self.state.lock().await;
            state.opaque_calls += 1;
            state.opaque_results.pop_front().unwrap_or(Ok(()))
        }
    }

    fn payload() -> serde_json::Value {
        serde_json::json!({"reference_id": "RES-TEST01"})
    }

    #[tokio::test]
    async fn two_xx_statuses_succeed_without_fallback() {
        for status in [200, 201, 204, 299] {
            let transport = Arc::new(ScriptedTransport::with_script(vec![Ok(status)], vec![]));
            let dispatcher = Dispatcher::new(transport.clone());

            let result = dispatcher.send("https://hooks.example.com/r", &payload()).await;
            assert!(result.success, "status {status} should count as delivered");
            assert_eq!(result.error, None);
            assert_eq!(transport.calls().await, (1, 0));
        }
    }

    #[tokio::test]
    async fn server_rejection_fails_immediately_with_no_fallback() {
        let transport = Arc::new(ScriptedTransport::with_script(vec![Ok(500)], vec![]));
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher.send("https://hooks.example.com/r", &payload()).await;
        assert!(!result.success);
        assert!(result.error.as_deref().expect("error message").contains("500"));
        assert_eq!(transport.calls().await, (1, 0), "opaque fallback must not run on rejection");
    }

    #[tokio::test]
    async fn transport_failure_falls_back_once_and_counts_as_delivered() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![Err(TransportError::Unreachable("dns failure".to_owned()))],
            vec![Ok(())],
        ));
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher.send("https://hooks.example.com/r", &payload()).await;
        assert!(result.success, "silent fallback completion is optimistic success");
        assert_eq!(transport.calls().await, (1, 1));
    }

    #[tokio::test]
    async fn failing_fallback_reports_both_errors() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![Err(TransportError::Unreachable("network down".to_owned()))],
            vec![Err(TransportError::Send("still down".to_owned()))],
        ));
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher.send("https://hooks.example.com/r", &payload()).await;
        assert!(!result.success);
        let message = result.error.expect("error message");
        assert!(message.contains("network down"));
        assert!(message.contains("still down"));
        assert_eq!(transport.calls().await, (1, 1), "fallback runs exactly once");
    }
}
