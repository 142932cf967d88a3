//! Per-line classification for the receipt layout.
//!
//! Classification is stateless: each line is tagged independently, and the
//! segmenter decides what a tag means in context. Indentation is the
//! primary signal, so lines must arrive with their leading whitespace
//! intact (as pdf-extract produces them).

use rust_decimal::Decimal;

use super::patterns::*;

/// The shape of a single receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line.
    Blank,
    /// Separator rule (a long run of `-` or `=`).
    Separator,
    /// Self-checkout section banner.
    SectionBanner,
    /// Printed item count ("Totalt 5 varor").
    TotalCount(u32),
    /// Printed total ("Totalt 118,94 SEK").
    TotalAmount(Decimal),
    /// Item header: name, optional inline descriptor, nominal price.
    Header {
        name: String,
        descriptor: String,
        amount: Decimal,
    },
    /// Indented descriptor with the item's price, printed below a bare
    /// name line for bulk-weight items.
    DescriptorContinuation { descriptor: String, amount: Decimal },
    /// Indented price adjustment (discount, pawn or similar).
    Adjustment { label: String, amount: Decimal },
    /// Indented extra information without an amount.
    InfoFragment(String),
    /// Non-indented line without an amount: a bulk item name awaiting its
    /// descriptor line, or a known non-indented information line.
    NameFragment(String),
    /// A shape the classifier does not know.
    Unrecognized,
}

/// Classify a single raw line.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim_end();
    if trimmed.trim_start().is_empty() {
        return LineKind::Blank;
    }

    if SEPARATOR.is_match(trimmed) {
        return LineKind::Separator;
    }
    if SECTION_BANNER.is_match(trimmed) {
        return LineKind::SectionBanner;
    }

    if let Some(caps) = TOTAL_AMOUNT.captures(trimmed) {
        if let Some(amount) = parse_sek_amount(&caps[1]) {
            return LineKind::TotalAmount(amount);
        }
    }
    if let Some(caps) = TOTAL_COUNT.captures(trimmed) {
        if let Ok(count) = caps[1].parse() {
            return LineKind::TotalCount(count);
        }
    }

    if trimmed.starts_with(char::is_whitespace) {
        return classify_indented(trimmed);
    }

    classify_top_level(trimmed)
}

fn classify_indented(line: &str) -> LineKind {
    if let Some(caps) = INDENTED_AMOUNT.captures(line) {
        let body = trim_spaces(&caps[1]);
        if let Some(amount) = parse_sek_amount(&caps[2]) {
            if DESCRIPTOR.is_match(&body) {
                return LineKind::DescriptorContinuation {
                    descriptor: body,
                    amount,
                };
            }
            return LineKind::Adjustment {
                label: body,
                amount,
            };
        }
    }

    LineKind::InfoFragment(trim_spaces(line))
}

fn classify_top_level(line: &str) -> LineKind {
    if let Some(caps) = ITEM_LINE.captures(line) {
        if let Some(amount) = parse_sek_amount(&caps[2]) {
            let raw_name = caps[1].trim_end();
            let (name, descriptor) = split_inline_descriptor(raw_name);
            return LineKind::Header {
                name,
                descriptor,
                amount,
            };
        }
    }

    // A top-level line with no price: either a bulk item name whose price
    // follows on the next line, or a stray information line. Anything not
    // starting with a letter or digit carries no recognizable name.
    if line.starts_with(|c: char| c.is_alphanumeric()) {
        return LineKind::NameFragment(trim_spaces(line));
    }

    LineKind::Unrecognized
}

/// Split a trailing quantity/unit-price token off an item header name.
fn split_inline_descriptor(raw_name: &str) -> (String, String) {
    if let Some(caps) = INLINE_DESCRIPTOR.captures(raw_name) {
        let descriptor = caps[1].to_string();
        let name = trim_spaces(&raw_name[..caps.get(0).unwrap().start()]);
        if !name.is_empty() {
            return (name, descriptor);
        }
    }
    (trim_spaces(raw_name), String::new())
}
