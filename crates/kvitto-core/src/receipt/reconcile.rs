//! Reduction of raw item blocks into final items.

use rust_decimal::Decimal;

use super::segmenter::RawItemBlock;
use crate::models::receipt::Item;

/// Reduce a block into an [`Item`], computing the net price as the nominal
/// price plus all adjustment amounts. Decimal arithmetic throughout, so
/// the reconciliation against the printed total stays exact.
pub(crate) fn reconcile(block: RawItemBlock) -> Item {
    let adjustment_sum: Decimal = block.adjustments.iter().map(|a| a.amount).sum();

    Item {
        name: block.name,
        descriptor: block.descriptor,
        adjustments: block
            .adjustments
            .into_iter()
            .map(|a| a.label)
            .collect(),
        price: block.nominal + adjustment_sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::segmenter::AdjustmentLine;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_price_sums_adjustments() {
        let block = RawItemBlock {
            name: "GRILLOST".to_string(),
            descriptor: "2st*15,50".to_string(),
            nominal: dec("31.00"),
            adjustments: vec![AdjustmentLine {
                label: "2 * Rabatt:GRILLOST".to_string(),
                amount: dec("-9.20"),
            }],
        };

        let item = reconcile(block);
        assert_eq!(item.price, dec("21.80"));
        assert_eq!(item.adjustments, vec!["2 * Rabatt:GRILLOST".to_string()]);
        assert_eq!(item.descriptor, "2st*15,50");
    }

    #[test]
    fn test_flat_price_passes_through() {
        let block = RawItemBlock {
            name: "VISPGRÄDDE 36%".to_string(),
            descriptor: String::new(),
            nominal: dec("21.90"),
            adjustments: vec![],
        };

        let item = reconcile(block);
        assert_eq!(item.price, dec("21.90"));
        assert!(item.adjustments.is_empty());
    }

    #[test]
    fn test_positive_adjustment() {
        // Pawn lines add to the price rather than subtracting.
        let block = RawItemBlock {
            name: "LÄSK".to_string(),
            descriptor: String::new(),
            nominal: dec("15.90"),
            adjustments: vec![AdjustmentLine {
                label: "PANT".to_string(),
                amount: dec("2.00"),
            }],
        };

        assert_eq!(reconcile(block).price, dec("17.90"));
    }
}
