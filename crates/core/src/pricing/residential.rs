use rust_decimal::Decimal;

use crate::domain::request::{Condition, Frequency, ResidentialRequest, ServiceCategory};
use crate::pricing::classify::addon_charge;
use crate::pricing::{PriceBreakdown, PriceComponent};

/// Base rate per service category, indexed by bedroom count 1..=5.
const GENERAL_BASE: [u32; 5] = [180, 215, 250, 285, 320];
const DEEP_BASE: [u32; 5] = [260, 310, 360, 410, 460];
const END_OF_LEASE_BASE: [u32; 5] = [320, 380, 440, 500, 560];
const POST_CONSTRUCTION_BASE: [u32; 5] = [380, 450, 520, 590, 660];

/// Homes beyond the tabled range extrapolate linearly from the 5-bedroom base.
const EXTRA_BEDROOM_CHARGE: u32 = 40;
const EXTRA_BATHROOM_CHARGE: u32 = 25;

const SUBSCRIPTION_DISCOUNT_PCT: u32 = 15;
const WEEKLY_DISCOUNT_PCT: u32 = 10;
const BIWEEKLY_DISCOUNT_PCT: u32 = 5;

pub fn price(request: &ResidentialRequest) -> Option<PriceBreakdown> {
    // Extreme condition always needs an on-site assessment.
    if request.condition == Condition::Extreme {
        return None;
    }
    if request.bedrooms == 0 || request.bathrooms == 0 {
        return None;
    }

    let base = base_price(request.category, request.bedrooms);
    let bathroom_surcharge =
        Decimal::from(request.bathrooms.saturating_sub(1) * EXTRA_BATHROOM_CHARGE);
    let labor = (base + bathroom_surcharge) * condition_multiplier(request.condition);

    let addons: Decimal = request
        .addons
        .iter()
        .map(|addon| Decimal::from(addon_charge(addon)))
        .sum();

    let subtotal = labor + addons;
    let discount = subtotal * discount_rate(request.frequency, request.annual_subscription);

    let mut components = vec![
        PriceComponent::new("base", base),
        PriceComponent::new("bathroom_surcharge", bathroom_surcharge),
        PriceComponent::new("labor", labor),
    ];
    if !request.addons.is_empty() {
        components.push(PriceComponent::new("addons", addons));
    }

    Some(PriceBreakdown::from_parts(components, subtotal, discount))
}

fn base_price(category: ServiceCategory, bedrooms: u32) -> Decimal {
    let table = match category {
        ServiceCategory::General => &GENERAL_BASE,
        ServiceCategory::Deep => &DEEP_BASE,
        ServiceCategory::EndOfLease => &END_OF_LEASE_BASE,
        ServiceCategory::PostConstruction => &POST_CONSTRUCTION_BASE,
    };

    if bedrooms <= 5 {
        Decimal::from(table[(bedrooms - 1) as usize])
    } else {
        Decimal::from(table[4] + (bedrooms - 5) * EXTRA_BEDROOM_CHARGE)
    }
}

fn condition_multiplier(condition: Condition) -> Decimal {
    match condition {
        Condition::Standard => Decimal::ONE,
        Condition::Moderate => Decimal::new(115, 2),
        Condition::Heavy => Decimal::new(130, 2),
        // Unreachable past the guard in `price`; priced as standard if it
        // ever leaks through so the math stays total.
        Condition::Extreme => Decimal::ONE,
    }
}

fn discount_rate(frequency: Frequency, annual_subscription: bool) -> Decimal {
    // An annual subscription on any recurring schedule beats every
    // frequency-based discount.
    if annual_subscription && frequency != Frequency::OneTime {
        return Decimal::new(SUBSCRIPTION_DISCOUNT_PCT.into(), 2);
    }

    match frequency {
        Frequency::Weekly => Decimal::new(WEEKLY_DISCOUNT_PCT.into(), 2),
        Frequency::Biweekly => Decimal::new(BIWEEKLY_DISCOUNT_PCT.into(), 2),
        Frequency::Monthly | Frequency::OneTime => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::Contact;

    fn contact() -> Contact {
        Contact {
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: "0400 000 000".to_string(),
        }
    }

    fn request(bedrooms: u32, bathrooms: u32) -> ResidentialRequest {
        ResidentialRequest {
            category: ServiceCategory::General,
            bedrooms,
            bathrooms,
            condition: Condition::Standard,
            frequency: Frequency::OneTime,
            annual_subscription: false,
            addons: vec![],
            preferred_date: None,
            contact: contact(),
        }
    }

    fn total(request: &ResidentialRequest) -> u32 {
        price(request).expect("price should be computable").total
    }

    #[test]
    fn two_bedroom_standard_general_one_time_is_215() {
        assert_eq!(total(&request(2, 1)), 215);
    }

    #[test]
    fn heavy_condition_multiplies_then_ceils_once() {
        let mut heavy = request(2, 1);
        heavy.condition = Condition::Heavy;
        // 215 * 1.30 = 279.5, ceiled at the end only.
        assert_eq!(total(&heavy), 280);
    }

    #[test]
    fn weekly_discount_applies_to_pre_rounded_subtotal() {
        let mut weekly = request(2, 1);
        weekly.frequency = Frequency::Weekly;
        // 215 * 0.90 = 193.5 -> 194.
        assert_eq!(total(&weekly), 194);
    }

    #[test]
    fn extreme_condition_is_never_priced() {
        let mut extreme = request(2, 1);
        extreme.condition = Condition::Extreme;
        assert_eq!(price(&extreme), None);

        extreme.bedrooms = 5;
        extreme.annual_subscription = true;
        extreme.addons = vec!["windows".to_string()];
        assert_eq!(price(&extreme), None);
    }

    #[test]
    fn zero_counts_are_refused_not_defaulted() {
        assert_eq!(price(&request(0, 1)), None);
        assert_eq!(price(&request(2, 0)), None);
    }

    #[test]
    fn price_is_monotonic_in_bedrooms_and_bathrooms() {
        for category in [
            ServiceCategory::General,
            ServiceCategory::Deep,
            ServiceCategory::EndOfLease,
            ServiceCategory::PostConstruction,
        ] {
            let mut previous = 0;
            for bedrooms in 1..=8 {
                let mut req = request(bedrooms, 1);
                req.category = category;
                let current = total(&req);
                assert!(current >= previous, "{category:?} {bedrooms}br regressed");
                previous = current;
            }
        }

        let mut previous = 0;
        for bathrooms in 1..=6 {
            let current = total(&request(3, bathrooms));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn condition_tiers_are_strictly_ordered() {
        for bedrooms in 1..=6 {
            for bathrooms in 1..=3 {
                let mut standard = request(bedrooms, bathrooms);
                let mut moderate = request(bedrooms, bathrooms);
                let mut heavy = request(bedrooms, bathrooms);
                standard.condition = Condition::Standard;
                moderate.condition = Condition::Moderate;
                heavy.condition = Condition::Heavy;

                assert!(total(&heavy) > total(&moderate));
                assert!(total(&moderate) > total(&standard));
            }
        }
    }

    #[test]
    fn end_of_lease_costs_more_than_general() {
        for bedrooms in 1..=7 {
            let general = request(bedrooms, 2);
            let mut end_of_lease = request(bedrooms, 2);
            end_of_lease.category = ServiceCategory::EndOfLease;
            assert!(total(&end_of_lease) > total(&general));
        }
    }

    #[test]
    fn any_addon_strictly_increases_the_total() {
        let bare = request(3, 2);
        for addon in ["window cleaning", "oven", "something unusual"] {
            let mut with_addon = bare.clone();
            with_addon.addons = vec![addon.to_string()];
            assert!(total(&with_addon) > total(&bare), "addon `{addon}` did not raise total");
        }
    }

    #[test]
    fn weekly_beats_one_time_for_identical_inputs() {
        let one_time = request(4, 2);
        let mut weekly = request(4, 2);
        weekly.frequency = Frequency::Weekly;
        assert!(total(&weekly) < total(&one_time));
    }

    #[test]
    fn subscription_discount_overrides_frequency_discounts() {
        // Monthly alone earns nothing; with a subscription it earns 15%.
        let mut monthly = request(2, 1);
        monthly.frequency = Frequency::Monthly;
        let base_total = total(&monthly);

        let mut subscribed = monthly.clone();
        subscribed.annual_subscription = true;
        // 215 * 0.85 = 182.75 -> 183.
        assert_eq!(total(&subscribed), 183);
        assert!(total(&subscribed) < base_total);

        // A subscription on a one-time job earns nothing.
        let mut one_time_subscribed = request(2, 1);
        one_time_subscribed.annual_subscription = true;
        assert_eq!(total(&one_time_subscribed), 215);
    }

    #[test]
    fn six_bedrooms_extrapolate_from_the_five_bedroom_base() {
        // General 5br = 320, plus one extra bedroom at 40.
        assert_eq!(total(&request(6, 1)), 360);
        assert_eq!(total(&request(8, 1)), 440);
    }
}
