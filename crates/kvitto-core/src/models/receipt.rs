//! Receipt data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully parsed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Purchased items, in order of appearance on the receipt.
    pub items: Vec<Item>,

    /// The receipt's own printed total, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Total>,
}

impl Receipt {
    /// Sum of the net prices of all items.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }
}

/// One purchased product line, possibly spanning multiple physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Product name as printed.
    pub name: String,

    /// Quantity/unit annotation (e.g. "2st*15,50" or
    /// "0,365kg*119,00kr/kg"), empty for a flat-priced item. Extra
    /// information lines are appended here verbatim.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub descriptor: String,

    /// Labels of discount/pawn lines applied to this item, in the order
    /// they appeared (e.g. "2 * Rabatt:GRILLOST").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<String>,

    /// Net price actually paid: nominal price plus all adjustments.
    pub price: Decimal,
}

/// The receipt-printed aggregate, used to cross-validate the item sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    /// Printed total amount in SEK.
    pub amount: Decimal,

    /// Printed item count ("Totalt N varor"), when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_items_total_sums_net_prices() {
        let receipt = Receipt {
            items: vec![
                Item {
                    name: "GRILLOST".to_string(),
                    descriptor: "2st*15,50".to_string(),
                    adjustments: vec!["2 * Rabatt:GRILLOST".to_string()],
                    price: Decimal::from_str("21.80").unwrap(),
                },
                Item {
                    name: "VISPGRÄDDE 36%".to_string(),
                    descriptor: String::new(),
                    adjustments: vec![],
                    price: Decimal::from_str("21.90").unwrap(),
                },
            ],
            total: None,
        };

        assert_eq!(receipt.items_total(), Decimal::from_str("43.70").unwrap());
    }
}
