use rand::Rng;

use ecomseed_core::{Order, OrderItem, Product};

use super::round_cents;
use crate::choice::Choice;
use crate::errors::GenerationError;
use crate::model::GenerateOptions;

/// Item prices deviate from the list price by at most this factor.
pub const PRICE_SPREAD: f64 = 0.1;
pub const MAX_QUANTITY: i64 = 5;

pub fn generate_order_items<R: Rng>(
    rng: &mut R,
    orders: &[Order],
    products: &[Product],
    options: &GenerateOptions,
) -> Result<Vec<OrderItem>, GenerationError> {
    if options.order_items == 0 {
        return Ok(Vec::new());
    }
    let orders = Choice::uniform("order", orders)?;
    let products = Choice::uniform("product", products)?;
    let mut items = Vec::with_capacity(options.order_items as usize);

    // No per-order dedupe: one order may list the same product twice.
    for order_item_id in 1..=options.order_items as i64 {
        let order = *orders.sample(rng);
        let product = *products.sample(rng);
        let factor = rng.random_range((1.0 - PRICE_SPREAD)..=(1.0 + PRICE_SPREAD));
        let item_price = round_cents(product.price * factor);
        let quantity = rng.random_range(1..=MAX_QUANTITY);

        items.push(OrderItem {
            order_item_id,
            order_id: order.order_id,
            product_id: product.product_id,
            quantity,
            item_price,
        });
    }

    Ok(items)
}
