//! Data models for receipts and configuration.

pub mod config;
pub mod receipt;

pub use config::{KvittoConfig, ParseConfig, PdfConfig};
pub use receipt::{Item, Receipt, Total};
