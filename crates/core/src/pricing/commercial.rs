use rust_decimal::Decimal;

use crate::domain::request::{CommercialFrequency, CommercialRequest, ContractTerm, FacilityCategory};
use crate::pricing::classify::classify_facility;
use crate::pricing::{PriceBreakdown, PriceComponent};

const MINIMUM_CHARGE_PER_VISIT: u32 = 220;

const HIGH_VOLUME_AREA: u32 = 500;
const MID_VOLUME_AREA: u32 = 300;

pub fn price(request: &CommercialRequest) -> Option<PriceBreakdown> {
    let facility_type = request.facility_type.as_deref().map(str::trim).filter(|ft| !ft.is_empty())?;
    let area = request.area_sqm?;
    let frequency = request.frequency?;
    if area <= Decimal::ZERO {
        return None;
    }

    let category = classify_facility(facility_type);
    let per_visit = (area * area_rate(category)).max(Decimal::from(MINIMUM_CHARGE_PER_VISIT));
    let per_visit_discounted = per_visit * (Decimal::ONE - volume_discount_rate(area));

    let monthly = per_visit_discounted * visits_per_month(frequency);
    let term_discount = monthly * term_discount_rate(request.term);

    let components = vec![
        PriceComponent::new("per_visit", per_visit),
        PriceComponent::new("per_visit_after_volume_discount", per_visit_discounted),
        PriceComponent::new("monthly", monthly),
    ];

    Some(PriceBreakdown::from_parts(components, monthly, term_discount))
}

fn area_rate(category: FacilityCategory) -> Decimal {
    match category {
        FacilityCategory::Medical => Decimal::new(750, 2),
        FacilityCategory::Office => Decimal::new(520, 2),
        FacilityCategory::Gym => Decimal::new(580, 2),
        FacilityCategory::Retail => Decimal::new(550, 2),
        FacilityCategory::Warehouse => Decimal::new(420, 2),
        FacilityCategory::Other => Decimal::new(500, 2),
    }
}

fn volume_discount_rate(area: Decimal) -> Decimal {
    if area > Decimal::from(HIGH_VOLUME_AREA) {
        Decimal::new(8, 2)
    } else if area > Decimal::from(MID_VOLUME_AREA) {
        Decimal::new(5, 2)
    } else {
        Decimal::ZERO
    }
}

fn visits_per_month(frequency: CommercialFrequency) -> Decimal {
    match frequency {
        CommercialFrequency::Daily => Decimal::from(26),
        CommercialFrequency::Weekly => Decimal::new(43, 1),
        CommercialFrequency::Fortnightly => Decimal::new(215, 2),
        CommercialFrequency::Monthly => Decimal::ONE,
    }
}

fn term_discount_rate(term: ContractTerm) -> Decimal {
    match term {
        ContractTerm::OneYear => Decimal::new(10, 2),
        ContractTerm::SixMonth => Decimal::new(5, 2),
        ContractTerm::MonthToMonth => Decimal::ZERO,
    }
}
