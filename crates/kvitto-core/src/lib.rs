//! Core library for Willys receipt parsing.
//!
//! This crate provides:
//! - PDF processing (layout-preserving text extraction)
//! - Line classification for the Willys receipt layout
//! - Item segmentation and price reconciliation (SEK, comma-decimal)
//! - Receipt data models with exact decimal amounts

pub mod error;
pub mod models;
pub mod pdf;
pub mod receipt;

pub use error::{KvittoError, Result};
pub use models::config::KvittoConfig;
pub use models::receipt::{Item, Receipt, Total};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use receipt::{ReceiptParser, parse_receipt};
