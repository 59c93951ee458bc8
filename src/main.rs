use clap::{Parser, ValueEnum};
use fastmile_scraper::{
    error_chain, ScraperConfig, StatusSession, DEFAULT_HOST, DEFAULT_TIMEOUT,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Prints everything the status page of a Nokia FastMile 4G gateway exposes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Modem hostname or IP address
    #[arg(short = 'H', long, env = "FASTMILE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Connection timeout in seconds
    #[arg(short, long, env = "FASTMILE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Read a saved status page instead of downloading it
    #[arg(long)]
    input: Option<PathBuf>,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScraperConfig::new(args.host, Duration::from_secs(args.timeout));
    let mut session = StatusSession::new(config);

    match &args.input {
        Some(path) => {
            debug!("Read status page from {}", path.display());
            session.load_file(path)?;
        }
        None => session.download().await?,
    }

    let report = session.report()?;
    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print!("{}", report),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error_chain(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}
