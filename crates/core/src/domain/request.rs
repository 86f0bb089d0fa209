use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::submission::ServiceType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    General,
    Deep,
    EndOfLease,
    PostConstruction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Standard,
    Moderate,
    Heavy,
    Extreme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommercialFrequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractTerm {
    MonthToMonth,
    SixMonth,
    OneYear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityCategory {
    Medical,
    Office,
    Gym,
    Retail,
    Warehouse,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialRequest {
    pub category: ServiceCategory,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub condition: Condition,
    pub frequency: Frequency,
    pub annual_subscription: bool,
    #[serde(default)]
    pub addons: Vec<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    pub contact: Contact,
}

/// Facility type, area, and visit frequency arrive as free-form form input
/// and may be absent; the pricing engine refuses rather than defaulting them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommercialRequest {
    #[serde(default)]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub area_sqm: Option<Decimal>,
    #[serde(default)]
    pub frequency: Option<CommercialFrequency>,
    pub term: ContractTerm,
    #[serde(default)]
    pub notes: Option<String>,
    pub contact: Contact,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirbnbRequest {
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub restock_amenities: bool,
    /// Bundled into the base rate; recorded for the cleaning crew only.
    #[serde(default)]
    pub linen_service: bool,
    #[serde(default)]
    pub preferred_date: Option<String>,
    pub contact: Contact,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum QuoteRequest {
    Residential(ResidentialRequest),
    Commercial(CommercialRequest),
    Airbnb(AirbnbRequest),
}

impl QuoteRequest {
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::Residential(_) => ServiceType::Residential,
            Self::Commercial(_) => ServiceType::Commercial,
            Self::Airbnb(_) => ServiceType::Airbnb,
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Self::Residential(request) => &request.contact,
            Self::Commercial(request) => &request.contact,
            Self::Airbnb(request) => &request.contact,
        }
    }
}
