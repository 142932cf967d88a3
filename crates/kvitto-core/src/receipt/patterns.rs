//! Regex patterns for the Willys receipt layout.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    // Separator rule at the start and end of the item list.
    pub static ref SEPARATOR: Regex = Regex::new(
        r"^(?:-{31}-+|={31}=+)$"
    ).unwrap();

    // Self checkout section banner.
    pub static ref SECTION_BANNER: Regex = Regex::new(
        r"^=+\s*\w+\s\w+\s*=+$"
    ).unwrap();

    // Printed item count line ("Totalt 5 varor" / "Totalt 1 vara").
    pub static ref TOTAL_COUNT: Regex = Regex::new(
        r"^\s*Totalt\s*(\d+)\s*var(?:or|a)$"
    ).unwrap();

    // Printed total line ("Totalt   118,94 SEK").
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"^\s*Totalt\s*(\d+,\d+)\s*SEK$"
    ).unwrap();

    // Item header: name (optionally with inline descriptor) and a trailing
    // comma-decimal amount. Names start with a letter or digit; anything
    // else carrying a price is an unrecognized layout variant.
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^([\p{L}\p{N}].*)\s+(-?\d+,\d+)$"
    ).unwrap();

    // Indented line with a trailing amount: either a price adjustment
    // (discount, pawn) or the descriptor half of a bulk-weight item.
    pub static ref INDENTED_AMOUNT: Regex = Regex::new(
        r"^\s+(.+)\s+(-?\d+,\d+)$"
    ).unwrap();

    // Quantity/unit-price descriptor ("2st*15,50", "0,365kg*119,00kr/kg").
    pub static ref DESCRIPTOR: Regex = Regex::new(
        r"^\d+(?:,\d+)?(?:st|kg)\*\d+,\d+(?:kr/kg)?$"
    ).unwrap();

    // Inline descriptor at the end of an item header name.
    pub static ref INLINE_DESCRIPTOR: Regex = Regex::new(
        r"\s+(\d+(?:,\d+)?(?:st|kg)\*\d+,\d+(?:kr/kg)?)$"
    ).unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

// Extra information lines that are sometimes printed without indentation.
pub const EXTRA_INFO_EXCEPTIONS: &[&str] = &["extrapris", "kort datum"];

/// Parse a Swedish comma-decimal amount (e.g. "15,50" or "-9,20").
pub fn parse_sek_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}

/// Format an amount in dot-decimal form with two fraction digits.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn trim_spaces(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}
