//! Error types for the kvitto-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the kvitto library.
#[derive(Error, Debug)]
pub enum KvittoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Extracted text is too short to be a receipt body.
    #[error("extracted text too short ({len} chars, minimum {min})")]
    TooLittleText { len: usize, min: usize },
}

/// Errors related to receipt parsing.
///
/// `UnrecognizedLine` and `AdjustmentWithoutItem` are structural failures:
/// the segmenter met a line shape it does not know inside the item region
/// and aborts rather than dropping it. `TotalMismatch` is a reconciliation
/// failure: the parsed items do not sum to the receipt's own printed total,
/// which indicates a parsing defect, not a legitimate receipt state.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A line inside the item region matched no known shape.
    #[error("could not parse line {number}: {line:?}")]
    UnrecognizedLine { line: String, number: usize },

    /// An adjustment or information line appeared before any item header.
    #[error("adjustment before any item at line {number}: {line:?}")]
    AdjustmentWithoutItem { line: String, number: usize },

    /// Sum of item prices does not match the printed total.
    #[error("item prices sum to {computed} but receipt total is {printed}")]
    TotalMismatch { printed: Decimal, computed: Decimal },
}

impl ParseError {
    /// Whether this is a structural failure (unrecognized layout) as
    /// opposed to a reconciliation failure (sum/total mismatch).
    pub fn is_structural(&self) -> bool {
        !matches!(self, ParseError::TotalMismatch { .. })
    }
}

/// Result type for the kvitto library.
pub type Result<T> = std::result::Result<T, KvittoError>;
