use rand::Rng;

use ecomseed_core::{COUNTRIES, Customer};

use super::date_between;
use crate::choice::Choice;
use crate::errors::GenerationError;
use crate::faker::{NameSource, email_token};
use crate::model::GenerateOptions;

pub fn generate_customers<R: Rng>(
    rng: &mut R,
    names: &dyn NameSource,
    options: &GenerateOptions,
) -> Result<Vec<Customer>, GenerationError> {
    let countries = Choice::uniform("country", COUNTRIES)?;
    let mut customers = Vec::with_capacity(options.customers as usize);

    for customer_id in 1..=options.customers as i64 {
        let first_name = names.first_name(rng);
        let last_name = names.last_name(rng);
        let suffix = rng.random_range(100..=999);
        let domain = names.domain_name(rng);
        let email = format!(
            "{}.{}{suffix}@{domain}",
            email_token(&first_name),
            email_token(&last_name)
        );
        let signup_date = date_between(rng, options.start_date, options.signup_end);
        let country = countries.sample_copied(rng).to_string();

        customers.push(Customer {
            customer_id,
            first_name,
            last_name,
            email,
            signup_date,
            country,
        });
    }

    Ok(customers)
}
