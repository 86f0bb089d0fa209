use rand::Rng;

use crate::domain::submission::ServiceType;

/// Alphabet without 0/O/1/I/L so codes survive being read over the phone.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;

/// Human-shareable reference for a submission, distinct from its storage id.
pub fn generate(service_type: ServiceType) -> String {
    let mut rng = rand::thread_rng();
    let code: String = (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", prefix(service_type), code)
}

fn prefix(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Residential => "RES",
        ServiceType::Commercial => "COM",
        ServiceType::Airbnb => "BNB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_carry_the_variant_prefix_and_fixed_length() {
        let reference = generate(ServiceType::Residential);
        assert!(reference.starts_with("RES-"));
        assert_eq!(reference.len(), 4 + CODE_LENGTH);

        assert!(generate(ServiceType::Commercial).starts_with("COM-"));
        assert!(generate(ServiceType::Airbnb).starts_with("BNB-"));
    }

    #[test]
    fn code_characters_come_from_the_unambiguous_alphabet() {
        let reference = generate(ServiceType::Airbnb);
        let code = reference.split_once('-').expect("prefix separator").1;
        assert!(code.bytes().all(|byte| CODE_ALPHABET.contains(&byte)));
    }
}
