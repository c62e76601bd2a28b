use chrono::Duration;
use rand::Rng;

use ecomseed_core::{Customer, Order, OrderStatus};

use super::date_between;
use crate::choice::Choice;
use crate::errors::GenerationError;
use crate::model::GenerateOptions;

/// Ship dates fall this many days after the order date, inclusive.
pub const SHIP_DELAY_DAYS: std::ops::RangeInclusive<i64> = 1..=7;

pub fn generate_orders<R: Rng>(
    rng: &mut R,
    customers: &[Customer],
    options: &GenerateOptions,
) -> Result<Vec<Order>, GenerationError> {
    if options.orders == 0 {
        return Ok(Vec::new());
    }
    let customers = Choice::uniform("customer", customers)?;
    let statuses = Choice::uniform("status", OrderStatus::ALL)?;
    let mut orders = Vec::with_capacity(options.orders as usize);

    for order_id in 1..=options.orders as i64 {
        let customer = *customers.sample(rng);
        let earliest = customer.signup_date.max(options.start_date);
        let order_date = date_between(rng, earliest, options.end_date);
        let status = statuses.sample_copied(rng);
        let ship_date = if status.has_ship_date() {
            let delay = rng.random_range(SHIP_DELAY_DAYS);
            Some(order_date + Duration::days(delay))
        } else {
            None
        };

        orders.push(Order {
            order_id,
            customer_id: customer.customer_id,
            order_date,
            ship_date,
            status,
        });
    }

    Ok(orders)
}
