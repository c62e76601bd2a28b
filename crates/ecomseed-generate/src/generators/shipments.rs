use chrono::NaiveDate;
use rand::Rng;

use ecomseed_core::{Carrier, Order, Shipment};

use super::{date_between, money_between};
use crate::choice::Choice;
use crate::errors::GenerationError;
use crate::model::GenerateOptions;

const MIN_COST: f64 = 5.0;
const MAX_COST: f64 = 50.0;

/// Earliest date a shipment for `order` may carry.
pub fn earliest_shipment_date(order: &Order) -> NaiveDate {
    order.ship_date.unwrap_or(order.order_date)
}

/// Latest date a shipment for `order` may carry under `horizon`.
pub fn latest_shipment_date(order: &Order, horizon: NaiveDate) -> NaiveDate {
    earliest_shipment_date(order).max(horizon)
}

pub fn generate_shipments<R: Rng>(
    rng: &mut R,
    orders: &[Order],
    options: &GenerateOptions,
) -> Result<Vec<Shipment>, GenerationError> {
    if options.shipments == 0 {
        return Ok(Vec::new());
    }
    let shippable: Vec<&Order> = orders
        .iter()
        .filter(|order| order.status.accepts_shipments())
        .collect();
    if shippable.is_empty() {
        return Err(GenerationError::InvalidOptions(format!(
            "{} shipments requested but no order is Shipped or Delivered",
            options.shipments
        )));
    }
    let shippable = Choice::uniform("shippable_order", shippable)?;
    let carriers = Choice::uniform("carrier", Carrier::ALL)?;
    let mut shipments = Vec::with_capacity(options.shipments as usize);

    for shipment_id in 1..=options.shipments as i64 {
        let order = *shippable.sample(rng);
        let shipment_date = date_between(
            rng,
            earliest_shipment_date(order),
            latest_shipment_date(order, options.end_date),
        );
        let carrier = carriers.sample_copied(rng);
        let tracking_number = format!(
            "{}{}",
            carrier.tracking_prefix(),
            rng.random_range(1_000_000_000_u64..=9_999_999_999)
        );
        let shipment_cost = money_between(rng, MIN_COST, MAX_COST);

        shipments.push(Shipment {
            shipment_id,
            order_id: order.order_id,
            shipment_date,
            carrier,
            tracking_number,
            shipment_cost,
        });
    }

    Ok(shipments)
}
