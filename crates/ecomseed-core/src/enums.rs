use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Apparel,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    #[serde(rename = "Sports & Outdoors")]
    SportsAndOutdoors,
    Books,
    #[serde(rename = "Toys & Games")]
    ToysAndGames,
    #[serde(rename = "Health & Beauty")]
    HealthAndBeauty,
    Automotive,
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Apparel,
        Category::HomeAndGarden,
        Category::SportsAndOutdoors,
        Category::Books,
        Category::ToysAndGames,
        Category::HealthAndBeauty,
        Category::Automotive,
        Category::FoodAndBeverages,
        Category::OfficeSupplies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Apparel => "Apparel",
            Self::HomeAndGarden => "Home & Garden",
            Self::SportsAndOutdoors => "Sports & Outdoors",
            Self::Books => "Books",
            Self::ToysAndGames => "Toys & Games",
            Self::HealthAndBeauty => "Health & Beauty",
            Self::Automotive => "Automotive",
            Self::FoodAndBeverages => "Food & Beverages",
            Self::OfficeSupplies => "Office Supplies",
        }
    }

    /// Product nouns used to build display names.
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Electronics => &[
                "Smartphone",
                "Laptop",
                "Tablet",
                "Headphones",
                "Speaker",
                "Smartwatch",
                "Camera",
                "TV",
                "Monitor",
                "Keyboard",
                "Mouse",
            ],
            Self::Apparel => &[
                "T-Shirt",
                "Jeans",
                "Dress",
                "Jacket",
                "Sneakers",
                "Boots",
                "Hat",
                "Sunglasses",
                "Belt",
                "Wallet",
            ],
            Self::HomeAndGarden => &[
                "Lamp",
                "Chair",
                "Table",
                "Rug",
                "Curtains",
                "Vase",
                "Plant Pot",
                "Candle",
                "Picture Frame",
                "Wall Clock",
            ],
            Self::SportsAndOutdoors => &[
                "Tent",
                "Backpack",
                "Bicycle",
                "Dumbbells",
                "Yoga Mat",
                "Running Shoes",
                "Golf Clubs",
                "Tennis Racket",
                "Basketball",
                "Soccer Ball",
            ],
            Self::Books => &[
                "Novel",
                "Biography",
                "Cookbook",
                "Textbook",
                "Comic Book",
                "Guide",
                "Atlas",
                "Dictionary",
                "Encyclopedia",
                "Manual",
            ],
            Self::ToysAndGames => &[
                "Board Game",
                "Action Figure",
                "Puzzle",
                "Doll",
                "LEGO Set",
                "RC Car",
                "Video Game",
                "Card Game",
                "Stuffed Animal",
                "Building Blocks",
            ],
            Self::HealthAndBeauty => &[
                "Shampoo",
                "Lotion",
                "Perfume",
                "Makeup Set",
                "Vitamins",
                "Skincare Cream",
                "Hairbrush",
                "Toothbrush",
                "Deodorant",
                "Face Mask",
            ],
            Self::Automotive => &[
                "Car Battery",
                "Tire",
                "Oil Filter",
                "Brake Pad",
                "Car Mat",
                "Phone Mount",
                "Dash Cam",
                "Jump Starter",
                "Air Freshener",
                "Cleaning Kit",
            ],
            Self::FoodAndBeverages => &[
                "Coffee Beans",
                "Tea",
                "Chocolate",
                "Snack Mix",
                "Protein Bar",
                "Energy Drink",
                "Cereal",
                "Pasta",
                "Sauce",
                "Spice Set",
            ],
            Self::OfficeSupplies => &[
                "Pen Set",
                "Notebook",
                "Stapler",
                "Paper Clips",
                "Folder",
                "Binder",
                "Calculator",
                "Desk Organizer",
                "Printer Paper",
                "Whiteboard",
            ],
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Pending and cancelled orders never get a ship date.
    pub fn has_ship_date(self) -> bool {
        !matches!(self, Self::Pending | Self::Cancelled)
    }

    /// Only shipped or delivered orders may carry shipments.
    pub fn accepts_shipments(self) -> bool {
        matches!(self, Self::Shipped | Self::Delivered)
    }
}

/// Shipping carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "UPS")]
    Ups,
    FedEx,
    #[serde(rename = "USPS")]
    Usps,
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "Amazon Logistics")]
    AmazonLogistics,
    OnTrac,
}

impl Carrier {
    pub const ALL: [Carrier; 6] = [
        Carrier::Ups,
        Carrier::FedEx,
        Carrier::Usps,
        Carrier::Dhl,
        Carrier::AmazonLogistics,
        Carrier::OnTrac,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ups => "UPS",
            Self::FedEx => "FedEx",
            Self::Usps => "USPS",
            Self::Dhl => "DHL",
            Self::AmazonLogistics => "Amazon Logistics",
            Self::OnTrac => "OnTrac",
        }
    }

    /// First two letters of the carrier name, uppercased.
    pub fn tracking_prefix(self) -> String {
        self.as_str().chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Customer countries, sampled with equal weight.
pub const COUNTRIES: [&str; 19] = [
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "Norway",
    "Japan",
    "South Korea",
    "Brazil",
    "Mexico",
    "India",
    "China",
    "Singapore",
    "United Arab Emirates",
];

macro_rules! closed_enum_text {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|item| item.as_str() == value)
                    .ok_or_else(|| Error::InvalidValue {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

closed_enum_text!(Category, "category");
closed_enum_text!(OrderStatus, "status");
closed_enum_text!(Carrier, "carrier");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_prefixes_use_two_uppercase_letters() {
        assert_eq!(Carrier::Ups.tracking_prefix(), "UP");
        assert_eq!(Carrier::FedEx.tracking_prefix(), "FE");
        assert_eq!(Carrier::AmazonLogistics.tracking_prefix(), "AM");
        assert_eq!(Carrier::OnTrac.tracking_prefix(), "ON");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
        assert!("Garden".parse::<Category>().is_err());
    }

    #[test]
    fn ship_date_and_shipment_rules_follow_status() {
        let with_ship_date: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.has_ship_date())
            .collect();
        assert_eq!(
            with_ship_date,
            vec![
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered
            ]
        );
        assert!(!OrderStatus::Processing.accepts_shipments());
        assert!(OrderStatus::Delivered.accepts_shipments());
    }

    #[test]
    fn serde_names_match_display_names() {
        let json = serde_json::to_string(&Category::HomeAndGarden).unwrap();
        assert_eq!(json, "\"Home & Garden\"");
        let json = serde_json::to_string(&Carrier::AmazonLogistics).unwrap();
        assert_eq!(json, "\"Amazon Logistics\"");
    }
}
