use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use glint_core::config::DeliveryConfig;
use glint_core::domain::request::QuoteRequest;
use glint_core::domain::submission::{FailedQueueEntry, ServiceType, Submission};
use glint_core::pricing::{price_request, PriceBreakdown};
use glint_core::reference;
use glint_core::validate::{validate_request, ValidationError};
use glint_delivery::{DispatchNotice, Dispatcher, NotificationSink};
use glint_store::repositories::SubmissionLog;
use glint_store::{DraftStore, FailureQueue};

/// Where one user-initiated submission ended up. Exactly one of these holds
/// for every request that passes validation.
#[derive(Clone, Debug)]
pub enum SubmissionOutcome {
    Delivered {
        submission: Submission,
        total: Option<u32>,
        record_id: Option<i64>,
    },
    Queued {
        submission: Submission,
        total: Option<u32>,
        error: String,
    },
}

impl SubmissionOutcome {
    pub fn delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    pub fn reference_id(&self) -> &str {
        match self {
            Self::Delivered { submission, .. } | Self::Queued { submission, .. } => {
                &submission.reference_id
            }
        }
    }

    pub fn total(&self) -> Option<u32> {
        match self {
            Self::Delivered { total, .. } | Self::Queued { total, .. } => *total,
        }
    }
}

pub struct SubmissionService {
    dispatcher: Dispatcher,
    queue: FailureQueue,
    log: Arc<dyn SubmissionLog>,
    drafts: DraftStore,
    notifier: Arc<dyn NotificationSink>,
    endpoints: DeliveryConfig,
}

impl SubmissionService {
    pub fn new(
        dispatcher: Dispatcher,
        queue: FailureQueue,
        log: Arc<dyn SubmissionLog>,
        drafts: DraftStore,
        notifier: Arc<dyn NotificationSink>,
        endpoints: DeliveryConfig,
    ) -> Self {
        Self { dispatcher, queue, log, drafts, notifier, endpoints }
    }

    /// One user action, end to end: validate, price, assemble, dispatch, and
    /// settle into exactly one of delivered or queued-for-retry.
    pub async fn submit(
        &self,
        request: QuoteRequest,
    ) -> Result<SubmissionOutcome, ValidationError> {
        validate_request(&request)?;

        let service_type = request.service_type();
        // A missing price is "needs manual quote", never a reason to stop.
        let breakdown = price_request(&request);
        let total = breakdown.as_ref().map(|breakdown| breakdown.total);
        let reference_id = reference::generate(service_type);
        let payload = build_payload(&request, breakdown.as_ref(), &reference_id);
        let submission = Submission::new(service_type, payload, reference_id);

        let endpoint = self.endpoints.endpoint_for(service_type);
        let result = self.dispatcher.send(endpoint, &submission.payload).await;

        let outcome = if result.success {
            let record_id = match self.log.record(&submission).await {
                Ok(stored) => Some(stored.record_id),
                Err(log_error) => {
                    // The lead is already delivered; a log failure only costs
                    // us the local copy.
                    error!(
                        event_name = "submission.log_failed",
                        reference_id = %submission.reference_id,
                        error = %log_error,
                        "delivered submission could not be written to the local log"
                    );
                    None
                }
            };

            if let Err(draft_error) = self.drafts.discard(service_type).await {
                warn!(
                    event_name = "submission.draft_discard_failed",
                    service_type = service_type.as_str(),
                    error = %draft_error,
                    "stale draft could not be discarded"
                );
            }

            info!(
                event_name = "submission.delivered",
                reference_id = %submission.reference_id,
                service_type = service_type.as_str(),
                quoted_total = total,
                "submission delivered"
            );
            SubmissionOutcome::Delivered { submission, total, record_id }
        } else {
            let error = result.error.unwrap_or_else(|| "delivery failed".to_string());
            if let Err(queue_error) = self.queue.append(FailedQueueEntry::new(submission.clone())).await
            {
                error!(
                    event_name = "submission.enqueue_failed",
                    reference_id = %submission.reference_id,
                    error = %queue_error,
                    "failed submission could not be queued for retry"
                );
            } else {
                info!(
                    event_name = "submission.queued",
                    reference_id = %submission.reference_id,
                    service_type = service_type.as_str(),
                    error = %error,
                    "submission queued for retry"
                );
            }
            SubmissionOutcome::Queued { submission, total, error }
        };

        self.notifier.notify(notice_for(&outcome, service_type)).await;

        Ok(outcome)
    }
}

fn build_payload(
    request: &QuoteRequest,
    breakdown: Option<&PriceBreakdown>,
    reference_id: &str,
) -> serde_json::Value {
    serde_json::json!({
        "reference_id": reference_id,
        "service_type": request.service_type().as_str(),
        "request": request,
        "price": breakdown,
        "quoted_total": breakdown.map(|breakdown| breakdown.total),
        "message": display_message(request, breakdown, reference_id),
        "submitted_at": Utc::now().to_rfc3339(),
    })
}

fn display_message(
    request: &QuoteRequest,
    breakdown: Option<&PriceBreakdown>,
    reference_id: &str,
) -> String {
    let service = request.service_type().as_str();
    match breakdown {
        Some(breakdown) => {
            format!("New {service} quote {reference_id}: estimated total ${}", breakdown.total)
        }
        None => format!("New {service} quote {reference_id}: needs manual quote"),
    }
}

fn notice_for(outcome: &SubmissionOutcome, service_type: ServiceType) -> DispatchNotice {
    match outcome {
        SubmissionOutcome::Delivered { submission, .. } => DispatchNotice {
            reference_id: submission.reference_id.clone(),
            service_type: service_type.as_str().to_string(),
            delivered: true,
            error: None,
        },
        SubmissionOutcome::Queued { submission, error, .. } => DispatchNotice {
            reference_id: submission.reference_id.clone(),
            service_type: service_type.as_str().to_string(),
            delivered: false,
            error: Some(error.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use glint_core::config::DeliveryConfig;
    use glint_core::domain::request::{
        Condition, Contact, Frequency, QuoteRequest, ResidentialRequest, ServiceCategory,
    };
    use glint_core::domain::submission::ServiceType;
    use glint_delivery::{
        DeliveryTransport, DispatchNotice, Dispatcher, NotificationSink, TransportError,
    };
    use glint_store::repositories::{InMemoryKvStore, InMemorySubmissionLog, SubmissionLog};
    use glint_store::{DraftStore, FailureQueue};

    use super::{SubmissionOutcome, SubmissionService};

    #[derive(Default)]
    struct ScriptedTransport {
        state: Mutex<TransportState>,
    }

    #[derive(Default)]
    struct TransportState {
        json_results: VecDeque<Result<u16, TransportError>>,
        json_calls: usize,
        opaque_calls: usize,
    }

    impl ScriptedTransport {
        fn returning(json_results: Vec<Result<u16, TransportError>>) -> Self {
            Self {
                state: Mutex::new(TransportState {
                    json_results: json_results.into(),
                    json_calls: 0,
                    opaque_calls: 0,
                }),
            }
        }

        async fn json_calls(&self) -> usize {
            self.state.lock().await.json_calls
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
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notices: Mutex<Vec<DispatchNotice>>,
    }

    #[async_trait::async_trait]
    impl NotificationSink for RecordingSink {
        async fn notify(&self, notice: DispatchNotice) {
            self.notices.lock().await.push(notice);
        }
    }

    struct Harness {
        service: SubmissionService,
        transport: Arc<ScriptedTransport>,
        kv: Arc<InMemoryKvStore>,
        log: Arc<InMemorySubmissionLog>,
        sink: Arc<RecordingSink>,
    }

    fn endpoints() -> DeliveryConfig {
        DeliveryConfig {
            residential_endpoint: "https://hooks.example.com/residential".to_string(),
            commercial_endpoint: "https://hooks.example.com/commercial".to_string(),
            airbnb_endpoint: "https://hooks.example.com/airbnb".to_string(),
            timeout_secs: 15,
        }
    }

    fn harness(json_results: Vec<Result<u16, TransportError>>) -> Harness {
        let transport = Arc::new(ScriptedTransport::returning(json_results));
        let kv = Arc::new(InMemoryKvStore::default());
        let log = Arc::new(InMemorySubmissionLog::default());
        let sink = Arc::new(RecordingSink::default());

        let service = SubmissionService::new(
            Dispatcher::new(transport.clone()),
            FailureQueue::new(kv.clone()),
            log.clone(),
            DraftStore::new(kv.clone()),
            sink.clone(),
            endpoints(),
        );

        Harness { service, transport, kv, log, sink }
    }

    fn residential_request() -> QuoteRequest {
        QuoteRequest::Residential(ResidentialRequest {
            category: ServiceCategory::General,
            bedrooms: 2,
            bathrooms: 1,
            condition: Condition::Standard,
            frequency: Frequency::OneTime,
            annual_subscription: false,
            addons: vec![],
            preferred_date: None,
            contact: Contact {
                name: "Dana Reyes".to_string(),
                email: "dana@example.com".to_string(),
                phone: "0400 000 000".to_string(),
            },
        })
    }

    #[tokio::test]
    async fn successful_submission_lands_in_the_log_not_the_queue() {
        let harness = harness(vec![Ok(200)]);

        let outcome =
            harness.service.submit(residential_request()).await.expect("submission should run");

        assert!(outcome.delivered());
        assert_eq!(outcome.total(), Some(215));

        let queue = FailureQueue::new(harness.kv.clone());
        assert!(queue.list().await.is_empty(), "delivered submissions never hit the queue");
        assert_eq!(harness.log.list().await.expect("log list").len(), 1);
    }

    #[tokio::test]
    async fn successful_submission_discards_the_variant_draft() {
        let harness = harness(vec![Ok(200)]);
        let drafts = DraftStore::new(harness.kv.clone());
        drafts
            .save(ServiceType::Residential, &serde_json::json!({"bedrooms": 2}))
            .await
            .expect("seed draft");

        harness.service.submit(residential_request()).await.expect("submission should run");

        assert_eq!(drafts.load(ServiceType::Residential).await, None);
    }

    #[tokio::test]
    async fn failed_dispatch_queues_exactly_once_and_reports_the_reason() {
        let harness = harness(vec![Ok(503)]);

        let outcome =
            harness.service.submit(residential_request()).await.expect("submission should run");

        let SubmissionOutcome::Queued { submission, error, total } = outcome else {
            panic!("expected queued outcome");
        };
        assert!(error.contains("503"));
        assert_eq!(total, Some(215));

        let queue = FailureQueue::new(harness.kv.clone());
        let entries = queue.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].submission.id, submission.id);
        assert_eq!(entries[0].submission.payload, submission.payload);
        assert!(harness.log.list().await.expect("log list").is_empty());
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_dispatcher() {
        let harness = harness(vec![]);

        let mut request = residential_request();
        if let QuoteRequest::Residential(residential) = &mut request {
            residential.contact.email = "not-an-email".to_string();
        }

        let result = harness.service.submit(request).await;
        assert!(result.is_err());
        assert_eq!(harness.transport.json_calls().await, 0);

        let queue = FailureQueue::new(harness.kv.clone());
        assert!(queue.list().await.is_empty());
    }

    #[tokio::test]
    async fn extreme_condition_submits_without_a_price() {
        let harness = harness(vec![Ok(200)]);

        let mut request = residential_request();
        if let QuoteRequest::Residential(residential) = &mut request {
            residential.condition = Condition::Extreme;
        }

        let outcome = harness.service.submit(request).await.expect("submission should run");
        assert!(outcome.delivered());
        assert_eq!(outcome.total(), None, "no price means manual review, not zero");

        let logged = harness.log.list().await.expect("log list");
        assert_eq!(logged[0].submission.payload["quoted_total"], serde_json::Value::Null);
        let message = logged[0].submission.payload["message"].as_str().expect("message");
        assert!(message.contains("needs manual quote"));
    }

    #[tokio::test]
    async fn commercial_submission_prices_through_the_same_flow() {
        use glint_core::domain::request::{CommercialFrequency, CommercialRequest, ContractTerm};
        use rust_decimal::Decimal;

        let harness = harness(vec![Ok(200)]);

        let outcome = harness
            .service
            .submit(QuoteRequest::Commercial(CommercialRequest {
                facility_type: Some("Office".to_string()),
                area_sqm: Some(Decimal::from(100)),
                frequency: Some(CommercialFrequency::Weekly),
                term: ContractTerm::MonthToMonth,
                notes: None,
                contact: Contact {
                    name: "Sam Okafor".to_string(),
                    email: "sam@example.com".to_string(),
                    phone: "0400 111 222".to_string(),
                },
            }))
            .await
            .expect("submission should run");

        assert!(outcome.delivered());
        assert_eq!(outcome.total(), Some(2236));
        assert!(outcome.reference_id().starts_with("COM-"));
    }

    #[tokio::test]
    async fn incomplete_commercial_request_submits_without_a_price() {
        use glint_core::domain::request::{CommercialRequest, ContractTerm};

        let harness = harness(vec![Ok(200)]);

        let outcome = harness
            .service
            .submit(QuoteRequest::Commercial(CommercialRequest {
                facility_type: Some("Office".to_string()),
                area_sqm: None,
                frequency: None,
                term: ContractTerm::MonthToMonth,
                notes: None,
                contact: Contact {
                    name: "Sam Okafor".to_string(),
                    email: "sam@example.com".to_string(),
                    phone: "0400 111 222".to_string(),
                },
            }))
            .await
            .expect("submission should run");

        assert!(outcome.delivered());
        assert_eq!(outcome.total(), None);
    }

    #[tokio::test]
    async fn airbnb_submission_uses_its_own_endpoint_reference_prefix() {
        use glint_core::domain::request::AirbnbRequest;

        let harness = harness(vec![Ok(200)]);

        let outcome = harness
            .service
            .submit(QuoteRequest::Airbnb(AirbnbRequest {
                bedrooms: 1,
                bathrooms: 1,
                restock_amenities: false,
                linen_service: false,
                preferred_date: None,
                contact: Contact {
                    name: "Ivy Lam".to_string(),
                    email: "ivy@example.com".to_string(),
                    phone: "0400 333 444".to_string(),
                },
            }))
            .await
            .expect("submission should run");

        assert!(outcome.delivered());
        assert_eq!(outcome.total(), Some(165));
        assert!(outcome.reference_id().starts_with("BNB-"));
    }

    #[tokio::test]
    async fn notifications_fire_for_both_outcomes_without_changing_them() {
        let harness = harness(vec![Ok(200), Ok(500)]);

        harness.service.submit(residential_request()).await.expect("first submission");
        harness.service.submit(residential_request()).await.expect("second submission");

        let notices = harness.sink.notices.lock().await;
        assert_eq!(notices.len(), 2);
        assert!(notices[0].delivered);
        assert!(!notices[1].delivered);
        assert!(notices[1].error.as_deref().expect("error").contains("500"));
    }

    #[tokio::test]
    async fn payload_carries_reference_price_message_and_timestamp() {
        let harness = harness(vec![Ok(200)]);

        let outcome =
            harness.service.submit(residential_request()).await.expect("submission should run");
        let SubmissionOutcome::Delivered { submission, .. } = outcome else {
            panic!("expected delivered outcome");
        };

        let payload = &submission.payload;
        assert_eq!(payload["reference_id"], serde_json::json!(submission.reference_id));
        assert_eq!(payload["service_type"], serde_json::json!("residential"));
        assert_eq!(payload["quoted_total"], serde_json::json!(215));
        assert!(payload["message"].as_str().expect("message").contains("$215"));
        assert!(payload["submitted_at"].as_str().is_some());
        assert_eq!(payload["request"]["variant"], serde_json::json!("residential"));
    }
}
