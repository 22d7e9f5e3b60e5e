use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use whats_up::{
    http_transport, load_sites, render, Aggregator, Overview, ReaderRegistry, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "whats-up")]
#[command(about = "Tracks if services are reporting any outages")]
struct Args {
    /// Path to the sites file (default: ./.whats-up.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Maximum number of status pages fetched at once
    #[arg(long)]
    max_in_flight: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overview = match run(args) {
        Ok(overview) => overview,
        Err(e) => {
            tracing::error!(error = %e, "unable to check sites");
            let mut stdout = io::stdout().lock();
            report_fatal(&mut stdout, &e)?;
            stdout.flush()?;
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    render::write_overview(&mut stdout, &overview, Local::now().date_naive())?;
    stdout.flush()?;

    Ok(())
}

/// Load configuration and check every site. Any error returned here
/// happened before a single site was queried.
fn run(args: Args) -> Result<Overview> {
    let mut settings = Settings::load(args.settings.as_deref())
        .map_err(|e| anyhow!("unable to load What's Up settings: {}", e))?;
    if let Some(config) = args.config {
        settings.sites_file = config;
    }
    if args.max_in_flight.is_some() {
        settings.max_in_flight = args.max_in_flight;
    }

    init_tracing(&settings.log_level);

    let sites = load_sites(&settings.sites_file)?;

    let transport = http_transport(&sites)
        .map_err(|e| anyhow!("unable to create HTTP client: {}", e))?;
    let mut aggregator = Aggregator::new(ReaderRegistry::builtin(), Arc::new(transport));
    if let Some(limit) = settings.max_in_flight {
        aggregator = aggregator.with_max_in_flight(limit);
    }

    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(aggregator.overview(&sites)))
}

/// Show a fatal error in the menu bar instead of leaving it blank.
fn report_fatal<W: Write>(w: &mut W, err: &anyhow::Error) -> io::Result<()> {
    render::write_fatal(w, err)
}

/// Log to stderr; stdout belongs to xbar.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
