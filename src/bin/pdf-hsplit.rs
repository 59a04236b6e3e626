//! PDF horizontal split CLI tool
//!
//! Splits each page of a PDF into one or more narrower pages by width ratios.

use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::process;

use pdf_hsplit::pdf::{split_pdf, SplitOptions};
use pdf_hsplit::Error;

/// PDF hsplit - Split PDF pages horizontally with specified ratios
#[derive(Parser)]
#[command(name = "pdf-hsplit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Split every page into two equal halves
    pdf-hsplit spreads.pdf pages.pdf h1:1

    # First page 1:1, second page unchanged, all remaining pages 35:36:37
    pdf-hsplit input.pdf output.pdf \"h1:1,1,h35:36:37\"

    # Keep the cover, split the rest in half, and open the result
    pdf-hsplit scan.pdf reading.pdf 1,h1:1 --open")]
struct Cli {
    /// Input PDF file path
    input_pdf: PathBuf,

    /// Output PDF file path (overwritten if it exists)
    output_pdf: PathBuf,

    /// Split configuration (e.g., "h1:1,1,h35:36:37" for first page 1:1,
    /// second page no split, third page and remaining pages 35:36:37)
    #[arg(allow_hyphen_values = true)]
    split_config: String,

    /// Store new and uncompressed streams as-is instead of Flate-compressing them
    #[arg(long)]
    no_compress: bool,

    /// Open the output file after creation
    #[arg(long)]
    open: bool,

    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).ok();

    let options = SplitOptions {
        input_path: cli.input_pdf,
        output_path: cli.output_pdf,
        split_config: cli.split_config,
        compress: !cli.no_compress,
    };

    match split_pdf(&options) {
        Ok(summary) => {
            info!(
                "{} source page(s) became {} page(s)",
                summary.source_pages, summary.output_pages
            );
            println!(
                "Successfully split PDF. Output saved to: {}",
                options.output_path.display()
            );

            if cli.open {
                if let Err(e) = open_file(&options.output_path) {
                    warn!("{:#}", e);
                }
            }
        }
        Err(e @ Error::FileNotFound(_)) => {
            println!("Error: {}", e);
            process::exit(e.exit_code());
        }
        Err(e) => {
            println!("Error processing PDF: {}", e);
            process::exit(e.exit_code());
        }
    }
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }
    Ok(())
}
