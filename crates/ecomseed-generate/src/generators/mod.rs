//! Per-entity generation steps.
//!
//! Each step takes the run's RNG explicitly and only reads parent
//! collections that were generated before it.

pub mod customers;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod shipments;

pub use customers::generate_customers;
pub use order_items::generate_order_items;
pub use orders::generate_orders;
pub use products::generate_products;
pub use shipments::generate_shipments;

use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Uniform date in `[start, end]`, inclusive on both ends.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    let offset = rng.random_range(0..=span);
    start + Duration::days(offset)
}

/// Uniform amount in `[min, max]` rounded to cents.
pub fn money_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    round_cents(rng.random_range(min..=max))
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
