use rust_decimal::Decimal;

use crate::domain::request::AirbnbRequest;
use crate::pricing::{PriceBreakdown, PriceComponent};

/// Turnover base rate by bedroom tier; listings beyond three bedrooms add a
/// flat per-bedroom charge on top of the three-bedroom base.
const ONE_BEDROOM_BASE: u32 = 165;
const TWO_BEDROOM_BASE: u32 = 205;
const THREE_BEDROOM_BASE: u32 = 240;
const EXTRA_BEDROOM_CHARGE: u32 = 35;

const EXTRA_BATHROOM_CHARGE: u32 = 25;
const RESTOCK_CHARGE: u32 = 35;

pub fn price(request: &AirbnbRequest) -> Option<PriceBreakdown> {
    if request.bedrooms == 0 || request.bathrooms == 0 {
        return None;
    }

    let base = Decimal::from(match request.bedrooms {
        1 => ONE_BEDROOM_BASE,
        2 => TWO_BEDROOM_BASE,
        3 => THREE_BEDROOM_BASE,
        more => THREE_BEDROOM_BASE + (more - 3) * EXTRA_BEDROOM_CHARGE,
    });

    let bathroom_surcharge =
        Decimal::from(request.bathrooms.saturating_sub(1) * EXTRA_BATHROOM_CHARGE);
    // Linen service is bundled into the base rate; only restocking amenities
    // is billed separately.
    let restock = if request.restock_amenities { Decimal::from(RESTOCK_CHARGE) } else { Decimal::ZERO };

    let subtotal = base + bathroom_surcharge + restock;

    let mut components = vec![
        PriceComponent::new("base", base),
        PriceComponent::new("bathroom_surcharge", bathroom_surcharge),
    ];
    if request.restock_amenities {
        components.push(PriceComponent::new("restock_amenities", restock));
    }

    Some(PriceBreakdown::from_parts(components, subtotal, Decimal::ZERO))
}
