use std::collections::HashMap;

use ecomseed_core::{Dataset, Order, Record};

use crate::errors::GenerationError;
use crate::generators::orders::SHIP_DELAY_DAYS;
use crate::generators::order_items::{MAX_QUANTITY, PRICE_SPREAD};
use crate::generators::shipments::{earliest_shipment_date, latest_shipment_date};
use crate::model::GenerateOptions;

/// Rounding to cents can push a price half a cent past the spread.
const PRICE_TOLERANCE: f64 = 0.005 + 1e-9;

/// Verify a generated dataset before it is written.
///
/// Returns the names of the checks that ran. The first failing check aborts
/// with `GenerationError::InvariantViolation`.
pub fn verify_dataset(
    dataset: &Dataset,
    options: &GenerateOptions,
) -> Result<Vec<&'static str>, GenerationError> {
    let mut passed = Vec::new();

    check_dense_keys("customers_dense_keys", &dataset.customers)?;
    check_dense_keys("products_dense_keys", &dataset.products)?;
    check_dense_keys("orders_dense_keys", &dataset.orders)?;
    check_dense_keys("order_items_dense_keys", &dataset.order_items)?;
    check_dense_keys("shipments_dense_keys", &dataset.shipments)?;
    passed.push("dense_primary_keys");

    let customers: HashMap<i64, _> = dataset
        .customers
        .iter()
        .map(|customer| (customer.customer_id, customer))
        .collect();
    let products: HashMap<i64, _> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product))
        .collect();
    let orders: HashMap<i64, &Order> = dataset
        .orders
        .iter()
        .map(|order| (order.order_id, order))
        .collect();

    for order in &dataset.orders {
        let Some(customer) = customers.get(&order.customer_id) else {
            return Err(violation(
                "orders_reference_customers",
                format!(
                    "order {} references missing customer {}",
                    order.order_id, order.customer_id
                ),
            ));
        };
        if order.order_date < customer.signup_date {
            return Err(violation(
                "order_after_signup",
                format!(
                    "order {} dated {} precedes signup {} of customer {}",
                    order.order_id, order.order_date, customer.signup_date, customer.customer_id
                ),
            ));
        }
        check_ship_date(order)?;
    }
    passed.extend(["orders_reference_customers", "order_after_signup", "ship_date_matches_status"]);

    for item in &dataset.order_items {
        if !orders.contains_key(&item.order_id) {
            return Err(violation(
                "order_items_reference_orders",
                format!(
                    "order item {} references missing order {}",
                    item.order_item_id, item.order_id
                ),
            ));
        }
        let Some(product) = products.get(&item.product_id) else {
            return Err(violation(
                "order_items_reference_products",
                format!(
                    "order item {} references missing product {}",
                    item.order_item_id, item.product_id
                ),
            ));
        };
        let low = product.price * (1.0 - PRICE_SPREAD) - PRICE_TOLERANCE;
        let high = product.price * (1.0 + PRICE_SPREAD) + PRICE_TOLERANCE;
        if item.item_price < low || item.item_price > high {
            return Err(violation(
                "item_price_within_spread",
                format!(
                    "order item {} priced {} outside [{low:.2}, {high:.2}] for product {}",
                    item.order_item_id, item.item_price, product.product_id
                ),
            ));
        }
        if !(1..=MAX_QUANTITY).contains(&item.quantity) {
            return Err(violation(
                "item_quantity_in_range",
                format!(
                    "order item {} has quantity {}",
                    item.order_item_id, item.quantity
                ),
            ));
        }
    }
    passed.extend([
        "order_items_reference_orders",
        "order_items_reference_products",
        "item_price_within_spread",
        "item_quantity_in_range",
    ]);

    for shipment in &dataset.shipments {
        let Some(order) = orders.get(&shipment.order_id) else {
            return Err(violation(
                "shipments_reference_orders",
                format!(
                    "shipment {} references missing order {}",
                    shipment.shipment_id, shipment.order_id
                ),
            ));
        };
        if !order.status.accepts_shipments() {
            return Err(violation(
                "shipments_for_shipped_orders",
                format!(
                    "shipment {} belongs to order {} with status {}",
                    shipment.shipment_id, order.order_id, order.status
                ),
            ));
        }
        let earliest = earliest_shipment_date(order);
        let latest = latest_shipment_date(order, options.end_date);
        if shipment.shipment_date < earliest || shipment.shipment_date > latest {
            return Err(violation(
                "shipment_date_window",
                format!(
                    "shipment {} dated {} outside [{earliest}, {latest}]",
                    shipment.shipment_id, shipment.shipment_date
                ),
            ));
        }
    }
    passed.extend([
        "shipments_reference_orders",
        "shipments_for_shipped_orders",
        "shipment_date_window",
    ]);

    Ok(passed)
}

fn check_ship_date(order: &Order) -> Result<(), GenerationError> {
    match (order.status.has_ship_date(), order.ship_date) {
        (false, None) => Ok(()),
        (false, Some(ship_date)) => Err(violation(
            "ship_date_matches_status",
            format!(
                "order {} is {} but has ship date {ship_date}",
                order.order_id, order.status
            ),
        )),
        (true, None) => Err(violation(
            "ship_date_matches_status",
            format!(
                "order {} is {} but has no ship date",
                order.order_id, order.status
            ),
        )),
        (true, Some(ship_date)) => {
            let delay = (ship_date - order.order_date).num_days();
            if SHIP_DELAY_DAYS.contains(&delay) {
                Ok(())
            } else {
                Err(violation(
                    "ship_date_matches_status",
                    format!(
                        "order {} ships {delay} days after ordering",
                        order.order_id
                    ),
                ))
            }
        }
    }
}

fn check_dense_keys<R: Record>(check: &'static str, rows: &[R]) -> Result<(), GenerationError> {
    for (idx, row) in rows.iter().enumerate() {
        let expected = idx as i64 + 1;
        if row.primary_key() != expected {
            return Err(violation(
                check,
                format!(
                    "{} row {} has key {} (expected {expected})",
                    R::TABLE,
                    idx + 1,
                    row.primary_key()
                ),
            ));
        }
    }
    Ok(())
}

fn violation(check: &'static str, detail: String) -> GenerationError {
    GenerationError::InvariantViolation { check, detail }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use ecomseed_core::{Carrier, Category, Customer, OrderItem, OrderStatus, Product, Shipment};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Dataset {
        Dataset {
            customers: vec![Customer {
                customer_id: 1,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada.lovelace123@example.com".to_string(),
                signup_date: ymd(2023, 5, 1),
                country: "United Kingdom".to_string(),
            }],
            products: vec![Product {
                product_id: 1,
                name: "Acme Lamp".to_string(),
                category: Category::HomeAndGarden,
                price: 100.0,
                launch_date: ymd(2022, 3, 1),
            }],
            orders: vec![
                Order {
                    order_id: 1,
                    customer_id: 1,
                    order_date: ymd(2023, 6, 1),
                    ship_date: Some(ymd(2023, 6, 3)),
                    status: OrderStatus::Delivered,
                },
                Order {
                    order_id: 2,
                    customer_id: 1,
                    order_date: ymd(2023, 6, 2),
                    ship_date: None,
                    status: OrderStatus::Pending,
                },
            ],
            order_items: vec![OrderItem {
                order_item_id: 1,
                order_id: 1,
                product_id: 1,
                quantity: 2,
                item_price: 109.99,
            }],
            shipments: vec![Shipment {
                shipment_id: 1,
                order_id: 1,
                shipment_date: ymd(2023, 6, 5),
                carrier: Carrier::Dhl,
                tracking_number: "DH1234567890".to_string(),
                shipment_cost: 9.5,
            }],
        }
    }

    fn failed_check(dataset: &Dataset) -> &'static str {
        match verify_dataset(dataset, &GenerateOptions::default()) {
            Err(GenerationError::InvariantViolation { check, .. }) => check,
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn consistent_fixture_passes() {
        let passed = verify_dataset(&fixture(), &GenerateOptions::default()).expect("valid");
        assert!(passed.contains(&"shipment_date_window"));
    }

    #[test]
    fn detects_dangling_customer() {
        let mut dataset = fixture();
        dataset.orders[0].customer_id = 42;
        assert_eq!(failed_check(&dataset), "orders_reference_customers");
    }

    #[test]
    fn detects_order_before_signup() {
        let mut dataset = fixture();
        dataset.orders[1].order_date = ymd(2023, 4, 30);
        assert_eq!(failed_check(&dataset), "order_after_signup");
    }

    #[test]
    fn detects_ship_date_on_pending_order() {
        let mut dataset = fixture();
        dataset.orders[1].ship_date = Some(ymd(2023, 6, 4));
        assert_eq!(failed_check(&dataset), "ship_date_matches_status");
    }

    #[test]
    fn detects_price_outside_spread() {
        let mut dataset = fixture();
        dataset.order_items[0].item_price = 111.0;
        assert_eq!(failed_check(&dataset), "item_price_within_spread");
    }

    #[test]
    fn detects_shipment_for_pending_order() {
        let mut dataset = fixture();
        dataset.shipments[0].order_id = 2;
        assert_eq!(failed_check(&dataset), "shipments_for_shipped_orders");
    }

    #[test]
    fn detects_shipment_before_ship_date() {
        let mut dataset = fixture();
        dataset.shipments[0].shipment_date = ymd(2023, 6, 2);
        assert_eq!(failed_check(&dataset), "shipment_date_window");
    }

    #[test]
    fn detects_key_gaps() {
        let mut dataset = fixture();
        dataset.orders[1].order_id = 3;
        assert_eq!(failed_check(&dataset), "orders_dense_keys");
    }
}
