use chrono::NaiveDate;
use ecomseed_core::{Order, OrderStatus, Shipment, Carrier, TableName};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn to_csv<T: serde::Serialize>(rows: &[T]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).expect("serialize row");
    }
    String::from_utf8(writer.into_inner().expect("flush")).expect("utf8")
}

#[test]
fn orders_serialize_missing_ship_date_as_empty_field() {
    let orders = vec![
        Order {
            order_id: 1,
            customer_id: 7,
            order_date: date(2024, 3, 1),
            ship_date: Some(date(2024, 3, 4)),
            status: OrderStatus::Shipped,
        },
        Order {
            order_id: 2,
            customer_id: 7,
            order_date: date(2024, 3, 2),
            ship_date: None,
            status: OrderStatus::Cancelled,
        },
    ];

    let expected = "order_id,customer_id,order_date,ship_date,status\n\
1,7,2024-03-01,2024-03-04,Shipped\n\
2,7,2024-03-02,,Cancelled\n";
    assert_eq!(to_csv(&orders), expected);

    let mut reader = csv::Reader::from_reader(expected.as_bytes());
    let parsed: Vec<Order> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("deserialize orders");
    assert_eq!(parsed, orders);
}

#[test]
fn shipment_header_matches_catalog_columns() {
    let shipment = Shipment {
        shipment_id: 1,
        order_id: 3,
        shipment_date: date(2025, 1, 9),
        carrier: Carrier::AmazonLogistics,
        tracking_number: "AM1234567890".to_string(),
        shipment_cost: 12.5,
    };

    let csv = to_csv(&[shipment]);
    let header = csv.lines().next().expect("header line");
    assert_eq!(header, TableName::Shipments.columns().join(","));
    assert!(csv.contains("Amazon Logistics"));
}
