//! CLI application for parsing Willys receipt PDFs.

mod output;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use kvitto_core::pdf::{PdfExtractor, PdfProcessor};
use kvitto_core::receipt::ReceiptParser;
use kvitto_core::{KvittoConfig, error::PdfError};

use output::OutputFormat;

/// Parse the item list in a receipt from the grocery store Willys.
///
/// Output contains each item's name and final price. Use --format to get
/// structured output instead of the tab-separated text form.
#[derive(Parser)]
#[command(name = "kvitto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input PDF receipt (obtained from the Willys website)
    #[arg(required = true)]
    receipt: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also print the receipt total
    #[arg(short, long)]
    total: bool,

    /// Dump the extracted receipt text and exit
    #[arg(short, long)]
    dump: bool,

    /// Skip the cross-check of item prices against the printed total
    #[arg(long)]
    no_check: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = if let Some(path) = &cli.config {
        KvittoConfig::from_file(path)?
    } else {
        KvittoConfig::default()
    };

    if !cli.receipt.exists() {
        anyhow::bail!("Input file not found: {}", cli.receipt.display());
    }

    // Extract the receipt text from the PDF.
    let data = fs::read(&cli.receipt)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let text = extractor.extract_text()?;

    if cli.dump {
        println!("{}", text);
        return Ok(());
    }

    if text.trim().len() < config.pdf.min_text_length {
        return Err(PdfError::TooLittleText {
            len: text.trim().len(),
            min: config.pdf.min_text_length,
        }
        .into());
    }

    // Parse the receipt.
    let parser = ReceiptParser::new().with_total_check(config.parse.check_total && !cli.no_check);
    let receipt = parser.parse(&text)?;

    let rendered = output::format_receipt(&receipt, cli.format, cli.total)?;

    if let Some(output_path) = &cli.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
