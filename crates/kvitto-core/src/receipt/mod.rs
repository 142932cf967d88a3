//! Receipt parsing: line classification, segmentation, reconciliation.

mod classify;
mod parser;
mod patterns;
mod reconcile;
mod segmenter;

pub use classify::{LineKind, classify_line};
pub use parser::{ReceiptParser, parse_receipt};
pub use patterns::{format_amount, parse_sek_amount, trim_spaces};

use crate::error::ParseError;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
