use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::DomainSuffix;
use fake::faker::name::en::{FirstName, LastName};
use rand::RngCore;

/// Source of synthetic display names.
///
/// Every call draws from the caller's RNG so a seeded run stays reproducible.
pub trait NameSource {
    fn first_name(&self, rng: &mut dyn RngCore) -> String;
    fn last_name(&self, rng: &mut dyn RngCore) -> String;
    fn company(&self, rng: &mut dyn RngCore) -> String;
    fn domain_name(&self, rng: &mut dyn RngCore) -> String;
}

/// `NameSource` backed by the `fake` crate's English locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeNames;

impl NameSource for FakeNames {
    fn first_name(&self, rng: &mut dyn RngCore) -> String {
        FirstName().fake_with_rng(rng)
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> String {
        LastName().fake_with_rng(rng)
    }

    fn company(&self, rng: &mut dyn RngCore) -> String {
        CompanyName().fake_with_rng(rng)
    }

    fn domain_name(&self, rng: &mut dyn RngCore) -> String {
        let label: String = LastName().fake_with_rng(rng);
        let suffix: String = DomainSuffix().fake_with_rng(rng);
        format!("{}.{}", email_token(&label), suffix)
    }
}

/// Lowercase ASCII alphanumerics only, for use in addresses.
pub fn email_token(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
