use thiserror::Error;

use crate::domain::request::{Contact, QuoteRequest};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("email address `{0}` is not well formed")]
    InvalidEmail(String),
}

/// Local checks that run before any pricing or dispatch; a failure here
/// never reaches the delivery endpoint.
pub fn validate_request(request: &QuoteRequest) -> Result<(), ValidationError> {
    validate_contact(request.contact())
}

pub fn validate_contact(contact: &Contact) -> Result<(), ValidationError> {
    if contact.name.trim().is_empty() {
        return Err(ValidationError::MissingField("contact.name"));
    }
    if contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingField("contact.phone"));
    }

    let email = contact.email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("contact.email"));
    }
    if !is_well_formed_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

fn is_well_formed_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
