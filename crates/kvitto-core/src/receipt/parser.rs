//! Top-level receipt parse: segmentation, reconciliation, total check.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::reconcile::reconcile;
use super::segmenter::segment;
use super::Result;
use crate::error::ParseError;
use crate::models::receipt::{Receipt, Total};

/// Rounding tolerance for the total cross-check, one öre.
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Parser for Willys receipt text.
///
/// The input is the full receipt body as one string, line layout
/// preserved, as produced by [`crate::pdf::PdfExtractor`]. Parsing is a
/// pure function of the text: same input, same output or same error.
pub struct ReceiptParser {
    /// Cross-check the item sum against the printed total.
    check_total: bool,
}

impl ReceiptParser {
    /// Create a parser with the total cross-check enabled.
    pub fn new() -> Self {
        Self { check_total: true }
    }

    /// Enable or disable the total cross-check.
    pub fn with_total_check(mut self, check: bool) -> Self {
        self.check_total = check;
        self
    }

    /// Parse a receipt from its extracted text.
    pub fn parse(&self, text: &str) -> Result<Receipt> {
        info!("parsing receipt from {} lines", text.lines().count());

        let segmentation = segment(text)?;

        let items: Vec<_> = segmentation.blocks.into_iter().map(reconcile).collect();
        let total = segmentation.total_amount.map(|amount| Total {
            amount,
            item_count: segmentation.total_count,
        });

        let receipt = Receipt { items, total };

        if self.check_total {
            if let Some(total) = &receipt.total {
                let computed = receipt.items_total();
                if (computed - total.amount).abs() > TOLERANCE {
                    return Err(ParseError::TotalMismatch {
                        printed: total.amount,
                        computed,
                    });
                }
            }
        }

        debug!(
            items = receipt.items.len(),
            total = ?receipt.total.as_ref().map(|t| t.amount),
            "parsed receipt"
        );

        Ok(receipt)
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a receipt with default settings.
pub fn parse_receipt(text: &str) -> Result<Receipt> {
    ReceiptParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rule() -> String {
        "-".repeat(50)
    }

    #[test]
    fn test_parse_with_matching_total() {
        let text = format!(
            "{}\nOST      10,00\nSKINKA   25,50\n{}\nTotalt 2 varor\nTotalt  35,50 SEK\n",
            rule(),
            rule()
        );
        let receipt = parse_receipt(&text).unwrap();
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.total.as_ref().unwrap().amount, dec("35.50"));
        assert_eq!(receipt.total.as_ref().unwrap().item_count, Some(2));
    }

    #[test]
    fn test_total_mismatch_is_surfaced() {
        let text = format!(
            "{}\nOST      10,00\n{}\nTotalt 1 vara\nTotalt  99,00 SEK\n",
            rule(),
            rule()
        );
        match parse_receipt(&text).unwrap_err() {
            ParseError::TotalMismatch { printed, computed } => {
                assert_eq!(printed, dec("99.00"));
                assert_eq!(computed, dec("10.00"));
            }
            other => panic!("expected TotalMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_total_check_can_be_disabled() {
        let text = format!(
            "{}\nOST      10,00\n{}\nTotalt  99,00 SEK\n",
            rule(),
            rule()
        );
        let receipt = ReceiptParser::new()
            .with_total_check(false)
            .parse(&text)
            .unwrap();
        assert_eq!(receipt.items_total(), dec("10.00"));
        assert_eq!(receipt.total.unwrap().amount, dec("99.00"));
    }

    #[test]
    fn test_missing_total_skips_check() {
        let text = format!("{}\nOST      10,00\n{}\n", rule(), rule());
        let receipt = parse_receipt(&text).unwrap();
        assert!(receipt.total.is_none());
        assert_eq!(receipt.items.len(), 1);
    }

    #[test]
    fn test_mismatch_within_tolerance_passes() {
        let text = format!(
            "{}\nOST      10,00\n{}\nTotalt  10,01 SEK\n",
            rule(),
            rule()
        );
        assert!(parse_receipt(&text).is_ok());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = format!(
            "{}\nGRILLOST               2st*15,50       31,00\n\
             \u{20}\u{20}2 * Rabatt:GRILLOST                  -9,20\n{}\nTotalt  21,80 SEK\n",
            rule(),
            rule()
        );
        let first = parse_receipt(&text).unwrap();
        let second = parse_receipt(&text).unwrap();
        assert_eq!(first, second);
    }
}
