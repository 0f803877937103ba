mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tollway_core::routing::SearchStrategy;

#[derive(Parser)]
#[command(name = "tollway", version)]
#[command(about = "Attribute highway toll prices to the OpenStreetMap ways they travel over")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the ways of every connection and write the enriched document
    Annotate(AnnotateArgs),
    /// Export one `;` separated row per connection with its ways
    Connections {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output CSV file
        #[arg(long)]
        csv: PathBuf,
    },
    /// Export mean price per km of each way from an enriched document
    Summary {
        /// Enriched pricing document holding a `by_way` block
        #[arg(long)]
        json: PathBuf,
        /// Output CSV file
        #[arg(long)]
        out: PathBuf,
        /// Significant digits of the values (2 or more, else up to 10 decimals)
        #[arg(long)]
        sig: Option<usize>,
    },
    /// Convert an Overpass response to GeoJSON
    Geojson {
        /// Overpass JSON response
        #[arg(long)]
        overpass: PathBuf,
        /// Output GeoJSON file
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Toll pricing document
    #[arg(long)]
    price: PathBuf,
    /// Overpass JSON response holding the road network
    #[arg(long)]
    overpass: PathBuf,
}

#[derive(Args)]
struct AnnotateArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Enriched pricing document
    #[arg(long)]
    out: PathBuf,
    /// Route connections on every core
    #[arg(long)]
    parallel: bool,
    /// How the candidate source nodes of a toll are searched
    #[arg(long)]
    strategy: Option<SearchStrategy>,
    /// Also write per-way price statistics to this CSV file
    #[arg(long)]
    stats_csv: Option<PathBuf>,
    /// Report sample variance instead of population variance
    #[arg(long)]
    sample: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;
    let settings = config::Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Annotate(args) => commands::annotate(&args, &settings),
        Commands::Connections { inputs, csv } => commands::connections(&inputs, &csv, &settings),
        Commands::Summary { json, out, sig } => commands::summary(&json, &out, sig, &settings),
        Commands::Geojson { overpass, out } => commands::geojson(&overpass, &out),
    }
}
