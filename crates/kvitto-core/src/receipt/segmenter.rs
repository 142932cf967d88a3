//! Segmentation of the line sequence into per-item blocks.
//!
//! One pass, top to bottom. The item region is delimited by separator
//! rules; the only lookahead is a single line, used to absorb the
//! descriptor half of a bulk-weight item into the same block.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::classify::{LineKind, classify_line};
use super::patterns::EXTRA_INFO_EXCEPTIONS;
use super::Result;
use crate::error::ParseError;

/// Raw grouping of the lines that describe one purchased item. Ephemeral:
/// reduced into an [`crate::models::receipt::Item`] as soon as the next
/// block boundary is seen.
#[derive(Debug)]
pub(crate) struct RawItemBlock {
    pub name: String,
    pub descriptor: String,
    /// Nominal price from the header (or descriptor continuation) line.
    pub nominal: Decimal,
    pub adjustments: Vec<AdjustmentLine>,
}

/// One adjustment line inside a block.
#[derive(Debug)]
pub(crate) struct AdjustmentLine {
    pub label: String,
    pub amount: Decimal,
}

impl RawItemBlock {
    fn new(name: String, descriptor: String, nominal: Decimal) -> Self {
        Self {
            name,
            descriptor,
            nominal,
            adjustments: Vec::new(),
        }
    }

    /// Append an extra information fragment to the descriptor text.
    fn push_info(&mut self, info: &str) {
        if self.descriptor.is_empty() {
            self.descriptor = info.to_string();
        } else {
            self.descriptor.push(' ');
            self.descriptor.push_str(info);
        }
    }
}

/// Output of segmentation: item blocks plus the printed totals.
#[derive(Debug)]
pub(crate) struct Segmentation {
    pub blocks: Vec<RawItemBlock>,
    pub total_amount: Option<Decimal>,
    pub total_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Store header, before the first separator.
    Preamble,
    /// The item list.
    Items,
    /// Everything after the terminal separator (VAT table, payment
    /// metadata); only the total matchers stay active.
    Trailer,
}

/// Split the receipt text into item blocks and capture the printed totals.
pub(crate) fn segment(text: &str) -> Result<Segmentation> {
    let mut lines = text.lines().enumerate().peekable();

    let mut region = Region::Preamble;
    let mut current: Option<RawItemBlock> = None;
    let mut blocks = Vec::new();
    let mut total_amount = None;
    let mut total_count = None;

    while let Some((idx, line)) = lines.next() {
        let number = idx + 1;
        let kind = classify_line(line);
        trace!(number, ?kind, "classified line");

        // The total lines are captured in whatever region they appear.
        match &kind {
            LineKind::TotalAmount(amount) => {
                total_amount = Some(*amount);
                continue;
            }
            LineKind::TotalCount(count) => {
                total_count = Some(*count);
                continue;
            }
            _ => {}
        }

        match region {
            Region::Preamble => {
                if kind == LineKind::Separator {
                    region = Region::Items;
                }
            }
            Region::Items => match kind {
                LineKind::Blank | LineKind::SectionBanner => {}
                LineKind::Separator => {
                    if let Some(block) = current.take() {
                        blocks.push(block);
                    }
                    region = Region::Trailer;
                }
                LineKind::Header {
                    name,
                    descriptor,
                    amount,
                } => {
                    if let Some(block) = current.take() {
                        blocks.push(block);
                    }
                    current = Some(RawItemBlock::new(name, descriptor, amount));
                }
                LineKind::Adjustment { label, amount } => match current.as_mut() {
                    Some(block) => block.adjustments.push(AdjustmentLine { label, amount }),
                    None => {
                        return Err(ParseError::AdjustmentWithoutItem {
                            line: line.to_string(),
                            number,
                        });
                    }
                },
                LineKind::InfoFragment(info) => match current.as_mut() {
                    Some(block) => block.push_info(&info),
                    None => {
                        return Err(ParseError::AdjustmentWithoutItem {
                            line: line.to_string(),
                            number,
                        });
                    }
                },
                LineKind::NameFragment(name) => {
                    // Some extra information lines are printed without
                    // indentation; the known ones attach to the open item.
                    if EXTRA_INFO_EXCEPTIONS.contains(&name.to_lowercase().as_str()) {
                        match current.as_mut() {
                            Some(block) => block.push_info(&name),
                            None => {
                                return Err(ParseError::AdjustmentWithoutItem {
                                    line: line.to_string(),
                                    number,
                                });
                            }
                        }
                        continue;
                    }

                    // Bulk items print the name alone and an indented
                    // descriptor with the price on the following line.
                    let continuation = lines
                        .peek()
                        .map(|&(_, next)| classify_line(next))
                        .and_then(|kind| match kind {
                            LineKind::DescriptorContinuation { descriptor, amount } => {
                                Some((descriptor, amount))
                            }
                            _ => None,
                        });

                    match continuation {
                        Some((descriptor, amount)) => {
                            lines.next();
                            if let Some(block) = current.take() {
                                blocks.push(block);
                            }
                            current = Some(RawItemBlock::new(name, descriptor, amount));
                        }
                        None => {
                            return Err(ParseError::UnrecognizedLine {
                                line: line.to_string(),
                                number,
                            });
                        }
                    }
                }
                // A priced line of a shape the classifier does not know, or
                // a descriptor continuation with no name line before it.
                LineKind::DescriptorContinuation { .. } | LineKind::Unrecognized => {
                    return Err(ParseError::UnrecognizedLine {
                        line: line.to_string(),
                        number,
                    });
                }
                LineKind::TotalAmount(_) | LineKind::TotalCount(_) => unreachable!(),
            },
            Region::Trailer => {}
        }
    }

    // A receipt truncated before the terminal separator still yields its
    // last open block.
    if let Some(block) = current.take() {
        blocks.push(block);
    }

    debug!(
        blocks = blocks.len(),
        total = ?total_amount,
        "segmented receipt"
    );

    Ok(Segmentation {
        blocks,
        total_amount,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rule() -> String {
        "-".repeat(50)
    }

    #[test]
    fn test_single_item() {
        let text = format!("{}\nMJÖLK                10,00\n{}\n", rule(), rule());
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 1);
        assert_eq!(seg.blocks[0].name, "MJÖLK");
        assert_eq!(seg.blocks[0].nominal, dec("10.00"));
    }

    #[test]
    fn test_adjustment_attaches_to_preceding_header() {
        let text = format!(
            "{}\n\
             GRILLOST               2st*15,50       31,00\n\
             \u{20}\u{20}2 * Rabatt:GRILLOST                  -9,20\n\
             VISPGRÄDDE 36%                         21,90\n\
             {}\n",
            rule(),
            rule()
        );
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 2);
        assert_eq!(seg.blocks[0].adjustments.len(), 1);
        assert_eq!(seg.blocks[0].adjustments[0].label, "2 * Rabatt:GRILLOST");
        assert_eq!(seg.blocks[0].adjustments[0].amount, dec("-9.20"));
        assert!(seg.blocks[1].adjustments.is_empty());
    }

    #[test]
    fn test_bulk_item_absorbs_descriptor_line() {
        let text = format!(
            "{}\n\
             NATURGODIS LV\n\
             \u{20}            0,365kg*119,00kr/kg       43,44\n\
             {}\n",
            rule(),
            rule()
        );
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 1);
        assert_eq!(seg.blocks[0].name, "NATURGODIS LV");
        assert_eq!(seg.blocks[0].descriptor, "0,365kg*119,00kr/kg");
        assert_eq!(seg.blocks[0].nominal, dec("43.44"));
    }

    #[test]
    fn test_preamble_lines_ignored() {
        let text = format!(
            "Willys Hemma Stockholm\nOrg nr 556163-2232\n{}\nOST      10,00\n{}\n",
            rule(),
            rule()
        );
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 1);
    }

    #[test]
    fn test_trailer_lines_ignored_but_totals_captured() {
        let text = format!(
            "{}\nOST      10,00\n{}\n\
             Totalt 1 vara\n\
             Totalt   10,00 SEK\n\
             Mottaget Kontokort                     10,00\n",
            rule(),
            rule()
        );
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 1);
        assert_eq!(seg.total_amount, Some(dec("10.00")));
        assert_eq!(seg.total_count, Some(1));
    }

    #[test]
    fn test_self_checkout_banner_skipped() {
        let text = format!(
            "{}\n===== Självscanning start =====\nOST      10,00\n{}\n",
            rule(),
            rule()
        );
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks.len(), 1);
    }

    #[test]
    fn test_adjustment_before_any_item_fails() {
        let text = format!("{}\n  2 * Rabatt:GRILLOST   -9,20\n{}\n", rule(), rule());
        let err = segment(&text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::AdjustmentWithoutItem { number: 2, .. }
        ));
    }

    #[test]
    fn test_unparseable_priced_line_fails() {
        let text = format!("{}\nOST      10,00\n???unparseable???    99,99\n{}\n", rule(), rule());
        let err = segment(&text).unwrap_err();
        match err {
            ParseError::UnrecognizedLine { line, number } => {
                assert_eq!(line, "???unparseable???    99,99");
                assert_eq!(number, 3);
            }
            other => panic!("expected UnrecognizedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_name_without_continuation_fails() {
        let text = format!("{}\nNATURGODIS LV\nOST      10,00\n{}\n", rule(), rule());
        assert!(matches!(
            segment(&text).unwrap_err(),
            ParseError::UnrecognizedLine { number: 2, .. }
        ));
    }

    #[test]
    fn test_info_exception_line_attaches() {
        let text = format!("{}\nOST      10,00\nextrapris\n{}\n", rule(), rule());
        let seg = segment(&text).unwrap();
        assert_eq!(seg.blocks[0].descriptor, "extrapris");
    }
}
