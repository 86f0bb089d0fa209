pub mod config;
pub mod domain;
pub mod pricing;
pub mod reference;
pub mod validate;

pub use domain::request::{
    AirbnbRequest, CommercialFrequency, CommercialRequest, Condition, Contact, ContractTerm,
    FacilityCategory, Frequency, QuoteRequest, ResidentialRequest, ServiceCategory,
};
pub use domain::submission::{
    FailedQueueEntry, ServiceType, Submission, SubmissionId, SubmissionStatus,
};
pub use pricing::{price_request, PriceBreakdown, PriceComponent};
pub use validate::{validate_contact, validate_request, ValidationError};
