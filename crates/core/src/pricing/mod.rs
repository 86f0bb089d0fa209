//! Rules-based pricing for the three quote variants.
//!
//! Every engine is a pure function from a fully-populated request to
//! `Option<PriceBreakdown>`. `None` is the explicit "not computable" result
//! (extreme property condition, missing commercial fields) and is never an
//! error: the submission flow carries on without a price.
//!
//! All arithmetic runs on `Decimal`; the only rounding anywhere is a single
//! ceiling to a whole currency unit on the final total. Percentage discounts
//! are taken on the pre-rounded subtotal.

pub mod airbnb;
pub mod classify;
pub mod commercial;
pub mod residential;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::request::QuoteRequest;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub label: String,
    pub amount: Decimal,
}

impl PriceComponent {
    pub fn new(label: &str, amount: Decimal) -> Self {
        Self { label: label.to_string(), amount }
    }
}

/// `total` is always `ceil(subtotal - discount)`; both inputs are
/// non-negative by construction, so the total never is either.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub components: Vec<PriceComponent>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: u32,
}

impl PriceBreakdown {
    pub fn from_parts(components: Vec<PriceComponent>, subtotal: Decimal, discount: Decimal) -> Self {
        let total = ceil_to_unit(subtotal - discount);
        Self { components, subtotal, discount, total }
    }
}

pub fn price_request(request: &QuoteRequest) -> Option<PriceBreakdown> {
    match request {
        QuoteRequest::Residential(request) => residential::price(request),
        QuoteRequest::Commercial(request) => commercial::price(request),
        QuoteRequest::Airbnb(request) => airbnb::price(request),
    }
}

fn ceil_to_unit(amount: Decimal) -> u32 {
    amount.max(Decimal::ZERO).ceil().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_rounds_fractions_up_and_leaves_whole_units_alone() {
        assert_eq!(ceil_to_unit(Decimal::new(2795, 1)), 280);
        assert_eq!(ceil_to_unit(Decimal::new(19350, 2)), 194);
        assert_eq!(ceil_to_unit(Decimal::from(215)), 215);
        assert_eq!(ceil_to_unit(Decimal::ZERO), 0);
    }

    #[test]
    fn breakdown_total_is_ceiling_of_subtotal_minus_discount() {
        let breakdown = PriceBreakdown::from_parts(
            vec![PriceComponent::new("labor", Decimal::from(215))],
            Decimal::from(215),
            Decimal::new(2150, 2),
        );
        assert_eq!(breakdown.total, 194);
    }
}
