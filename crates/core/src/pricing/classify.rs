//! Ordered keyword classification for free-form form input.
//!
//! Both tables are evaluated top to bottom and the first rule whose keyword
//! matches wins. The order is behaviorally significant (a "medical office"
//! must price as Medical, not Office) and is pinned by tests.

use crate::domain::request::FacilityCategory;

const FACILITY_RULES: &[(&[&str], FacilityCategory)] = &[
    (
        &["medical", "clinic", "dental", "hospital", "doctor", "pharmacy", "health"],
        FacilityCategory::Medical,
    ),
    (&["office", "corporate", "coworking", "workspace"], FacilityCategory::Office),
    (&["gym", "fitness", "yoga", "pilates", "studio"], FacilityCategory::Gym),
    (&["retail", "shop", "store", "boutique", "showroom", "salon"], FacilityCategory::Retail),
    (&["warehouse", "industrial", "factory", "storage", "depot"], FacilityCategory::Warehouse),
];

pub fn classify_facility(facility_type: &str) -> FacilityCategory {
    let normalized = facility_type.to_lowercase();
    FACILITY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(FacilityCategory::Other)
}

const ADDON_RULES: &[(&[&str], u32)] = &[
    (&["window"], 40),
    (&["oven", "stove"], 45),
    (&["fridge", "refrigerator", "freezer"], 35),
    (&["carpet", "steam"], 50),
    (&["balcony", "patio"], 30),
    (&["garage"], 45),
    (&["laundry", "ironing"], 25),
];

/// Unrecognized add-ons are still billable work; they fall back to a flat
/// charge instead of being rejected.
pub const GENERIC_ADDON_CHARGE: u32 = 30;

pub fn addon_charge(addon: &str) -> u32 {
    let normalized = addon.to_lowercase();
    ADDON_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(_, charge)| *charge)
        .unwrap_or(GENERIC_ADDON_CHARGE)
}
