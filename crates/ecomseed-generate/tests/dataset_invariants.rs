use std::collections::{HashMap, HashSet};

use ecomseed_core::{OrderStatus, TableName};
use ecomseed_generate::{GenerateOptions, GenerationEngine, GenerationError};

fn full_dataset() -> ecomseed_core::Dataset {
    GenerationEngine::new(GenerateOptions::default())
        .generate()
        .expect("generate seed 42")
}

#[test]
fn seed_42_produces_requested_row_counts() {
    let dataset = full_dataset();
    let expected = [
        (TableName::Customers, 1000),
        (TableName::Products, 500),
        (TableName::Orders, 2000),
        (TableName::OrderItems, 4000),
        (TableName::Shipments, 1500),
    ];
    for (table, rows) in expected {
        assert_eq!(dataset.row_count(table), rows, "{table}");
    }
}

#[test]
fn orders_follow_signup_and_ship_rules() {
    let dataset = full_dataset();
    let signups: HashMap<i64, _> = dataset
        .customers
        .iter()
        .map(|customer| (customer.customer_id, customer.signup_date))
        .collect();

    for order in &dataset.orders {
        let signup = signups[&order.customer_id];
        assert!(order.order_date >= signup, "order {}", order.order_id);

        match order.status {
            OrderStatus::Pending | OrderStatus::Cancelled => {
                assert!(order.ship_date.is_none(), "order {}", order.order_id);
            }
            _ => {
                let ship_date = order.ship_date.expect("ship date");
                let delay = (ship_date - order.order_date).num_days();
                assert!((1..=7).contains(&delay), "order {} delay {delay}", order.order_id);
            }
        }
    }
}

#[test]
fn order_items_stay_near_list_price() {
    let dataset = full_dataset();
    let prices: HashMap<i64, f64> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product.price))
        .collect();

    for item in &dataset.order_items {
        let price = prices[&item.product_id];
        assert!(item.item_price >= 0.9 * price - 0.01, "item {}", item.order_item_id);
        assert!(item.item_price <= 1.1 * price + 0.01, "item {}", item.order_item_id);
        assert!((1..=5).contains(&item.quantity));
    }

    for product in &dataset.products {
        assert!((5.0..=5000.0).contains(&product.price));
        assert!(product.launch_date <= GenerateOptions::default().launch_end);
    }
}

#[test]
fn shipments_only_follow_shipped_orders() {
    let dataset = full_dataset();
    let orders: HashMap<i64, _> = dataset
        .orders
        .iter()
        .map(|order| (order.order_id, order))
        .collect();

    for shipment in &dataset.shipments {
        let order = orders[&shipment.order_id];
        assert!(matches!(
            order.status,
            OrderStatus::Shipped | OrderStatus::Delivered
        ));
        let earliest = order.ship_date.unwrap_or(order.order_date);
        assert!(shipment.shipment_date >= earliest, "shipment {}", shipment.shipment_id);
        assert!((5.0..=50.0).contains(&shipment.shipment_cost));

        let prefix = shipment.carrier.tracking_prefix();
        let digits = shipment
            .tracking_number
            .strip_prefix(prefix.as_str())
            .expect("carrier prefix");
        assert_eq!(digits.len(), 10);
        assert!(digits.chars().all(|ch| ch.is_ascii_digit()));
    }
}

#[test]
fn foreign_keys_close_over_parents() {
    let dataset = full_dataset();
    let customer_ids: HashSet<i64> = dataset.customers.iter().map(|c| c.customer_id).collect();
    let product_ids: HashSet<i64> = dataset.products.iter().map(|p| p.product_id).collect();
    let order_ids: HashSet<i64> = dataset.orders.iter().map(|o| o.order_id).collect();

    assert!(dataset.orders.iter().all(|o| customer_ids.contains(&o.customer_id)));
    assert!(dataset.order_items.iter().all(|i| order_ids.contains(&i.order_id)));
    assert!(dataset.order_items.iter().all(|i| product_ids.contains(&i.product_id)));
    assert!(dataset.shipments.iter().all(|s| order_ids.contains(&s.order_id)));
}

#[test]
fn customer_emails_derive_from_names() {
    let dataset = full_dataset();
    for customer in dataset.customers.iter().take(50) {
        let (local, domain) = customer.email.split_once('@').expect("email");
        assert!(local.contains('.'));
        assert!(domain.contains('.'));
        let suffix: String = local.chars().rev().take(3).collect();
        assert!(suffix.chars().all(|ch| ch.is_ascii_digit()), "{}", customer.email);
    }
}

#[test]
fn shipments_without_shippable_orders_are_rejected() {
    let options = GenerateOptions {
        orders: 0,
        order_items: 0,
        shipments: 5,
        ..GenerateOptions::default()
    };
    let err = GenerationEngine::new(options)
        .generate()
        .expect_err("shipments need orders");
    assert!(matches!(err, GenerationError::InvalidOptions(_)));
}
