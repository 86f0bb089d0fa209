use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Residential,
    Commercial,
    Airbnb,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Airbnb => "airbnb",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "airbnb" => Some(Self::Airbnb),
            _ => None,
        }
    }
}

/// Lifecycle beyond `Pending` is owned by the back-office tooling; the
/// pipeline only ever writes the initial state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Confirmed,
    Contacted,
    Completed,
    Cancelled,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Contacted => "contacted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "contacted" => Some(Self::Contacted),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub created_at: DateTime<Utc>,
    pub service_type: ServiceType,
    pub status: SubmissionStatus,
    pub payload: serde_json::Value,
    pub reference_id: String,
}

impl Submission {
    pub fn new(service_type: ServiceType, payload: serde_json::Value, reference_id: String) -> Self {
        Self {
            id: SubmissionId::generate(),
            created_at: Utc::now(),
            service_type,
            status: SubmissionStatus::Pending,
            payload,
            reference_id,
        }
    }
}

/// The service type is persisted alongside the submission so a retry can
/// resolve the original endpoint without re-deriving anything.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailedQueueEntry {
    pub submission: Submission,
    pub service_type: ServiceType,
}

impl FailedQueueEntry {
    pub fn new(submission: Submission) -> Self {
        let service_type = submission.service_type;
        Self { submission, service_type }
    }
}
