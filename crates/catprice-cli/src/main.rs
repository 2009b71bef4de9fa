mod catalog;
mod pricing;

use std::path::PathBuf;

use catprice_core::{Channel, DistanceBand, ExportFormat};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catprice")]
#[command(about = "Price a CardapioWeb catalog for iFood, 99Food and Keeta")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the partner catalog and print priced rows
    Catalog {
        /// Keeta distance band (UP_TO_2, FROM_2_TO_4, ABOVE_4)
        #[arg(long)]
        band: Option<String>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Fetch the partner catalog and write an export file
    Export {
        /// Export format (json, csv)
        #[arg(long)]
        format: ExportFormat,

        /// Keeta distance band (UP_TO_2, FROM_2_TO_4, ABOVE_4)
        #[arg(long)]
        band: Option<String>,

        /// Output path; defaults to `catalogo_{band}_{date}.{ext}` in the
        /// current directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the channel prices for one base price
    Quote {
        /// Price to net after fees, e.g. `12.50` or `12,50`
        #[arg(long)]
        base_price: String,

        /// Keeta distance band (UP_TO_2, FROM_2_TO_4, ABOVE_4)
        #[arg(long)]
        band: Option<String>,

        /// Only print this channel (ifood, food99, keeta)
        #[arg(long)]
        channel: Option<Channel>,
    },
    /// Print the Keeta distance-band fee table
    Bands,
}

/// Resolves a `--band` argument. Unrecognized codes fall back to `default`
/// with a warning.
fn resolve_band(raw: Option<&str>, default: DistanceBand) -> DistanceBand {
    if let Some(code) = raw.filter(|c| c.trim().parse::<DistanceBand>().is_err()) {
        tracing::warn!(band = %code, fallback = %default, "unknown distance band");
    }
    DistanceBand::parse_or_default(raw, default)
}

fn init_tracing() -> anyhow::Result<()> {
    let fallback = std::env::var("CATPRICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Catalog { band, json }) => {
            catalog::run_catalog(band.as_deref(), json).await?;
        }
        Some(Commands::Export {
            format,
            band,
            output,
        }) => {
            catalog::run_export(format, band.as_deref(), output).await?;
        }
        Some(Commands::Quote {
            base_price,
            band,
            channel,
        }) => {
            pricing::run_quote(&base_price, band.as_deref(), channel)?;
        }
        Some(Commands::Bands) => pricing::run_bands(),
        None => println!("catprice: run with --help to list commands"),
    }

    Ok(())
}
