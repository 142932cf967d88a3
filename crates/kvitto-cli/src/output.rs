//! Output projections of parsed receipts.
//!
//! Pure functions from [`Receipt`] records to text, kept apart from the
//! parsing core so each form can be tested on its own.

use kvitto_core::Receipt;
use kvitto_core::receipt::format_amount;

/// Supported output formats.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated item lines
    Text,
    /// JSON records
    Json,
    /// CSV rows
    Csv,
}

/// Render a receipt in the requested format.
pub fn format_receipt(
    receipt: &Receipt,
    format: OutputFormat,
    with_total: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(receipt, with_total)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(receipt)?)),
        OutputFormat::Csv => format_csv(receipt, with_total),
    }
}

/// The original tab-separated form: name, parenthesized descriptor and
/// adjustment labels when present, then the net price.
fn format_text(receipt: &Receipt, with_total: bool) -> String {
    let mut out = String::new();

    for item in &receipt.items {
        out.push_str(&item.name);

        let mut annotations: Vec<&str> = Vec::new();
        if !item.descriptor.is_empty() {
            annotations.push(&item.descriptor);
        }
        annotations.extend(item.adjustments.iter().map(String::as_str));
        if !annotations.is_empty() {
            out.push_str(&format!(" ({})", annotations.join(", ")));
        }

        out.push_str(&format!("\t{}\n", format_amount(item.price)));
    }

    if with_total {
        if let Some(total) = &receipt.total {
            out.push_str(&format!("\nTotal\t{}\n", format_amount(total.amount)));
        }
    }

    out
}

fn format_csv(receipt: &Receipt, with_total: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "descriptor", "adjustments", "price"])?;

    for item in &receipt.items {
        wtr.write_record([
            item.name.as_str(),
            item.descriptor.as_str(),
            &item.adjustments.join("; "),
            &format_amount(item.price),
        ])?;
    }

    if with_total {
        if let Some(total) = &receipt.total {
            wtr.write_record(["Total", "", "", &format_amount(total.amount)])?;
        }
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
