use std::collections::HashMap;

use rand::Rng;

use ecomseed_core::{Category, Product};

use super::{date_between, money_between};
use crate::choice::Choice;
use crate::errors::GenerationError;
use crate::faker::NameSource;
use crate::model::GenerateOptions;

const MIN_PRICE: f64 = 5.0;
const MAX_PRICE: f64 = 5000.0;

pub fn generate_products<R: Rng>(
    rng: &mut R,
    names: &dyn NameSource,
    options: &GenerateOptions,
) -> Result<Vec<Product>, GenerationError> {
    let categories = Choice::uniform("category", Category::ALL)?;
    let templates = Category::ALL
        .into_iter()
        .map(|category| {
            Choice::uniform("template", category.templates().iter().copied())
                .map(|choice| (category, choice))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;
    let mut products = Vec::with_capacity(options.products as usize);

    for product_id in 1..=options.products as i64 {
        let category = categories.sample_copied(rng);
        let template = templates
            .get(&category)
            .map(|choice| choice.sample_copied(rng))
            .unwrap_or_else(|| category.as_str());
        let name = format!("{} {template}", names.company(rng));
        let price = money_between(rng, MIN_PRICE, MAX_PRICE);
        let launch_date = date_between(rng, options.start_date, options.launch_end);

        products.push(Product {
            product_id,
            name,
            category,
            price,
            launch_date,
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    struct Acme;

    impl NameSource for Acme {
        fn first_name(&self, _rng: &mut dyn RngCore) -> String {
            "Ada".to_string()
        }
        fn last_name(&self, _rng: &mut dyn RngCore) -> String {
            "Lovelace".to_string()
        }
        fn company(&self, _rng: &mut dyn RngCore) -> String {
            "Acme".to_string()
        }
        fn domain_name(&self, _rng: &mut dyn RngCore) -> String {
            "acme.test".to_string()
        }
    }

    #[test]
    fn names_use_a_template_of_their_category() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let options = GenerateOptions {
            products: 400,
            ..GenerateOptions::default()
        };
        let products = generate_products(&mut rng, &Acme, &options).expect("products");

        let mut seen = HashSet::new();
        for product in &products {
            let template = product.name.strip_prefix("Acme ").expect("company prefix");
            assert!(
                product.category.templates().contains(&template),
                "{template} is not a {} template",
                product.category
            );
            seen.insert(template.to_string());
        }
        assert!(seen.len() > Category::ALL.len());
    }
}
