//! TempoIQ encode CLI
//!
//! Encodes request bodies from TOML or JSON input files:
//! - Write batches of points
//! - Create device definitions
//! - Read queries
//!
//! Timestamps in input files are RFC 3339 strings (quoted in TOML).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempoiq_wire::{
    generate_default_config, Config, Device, Encodable, Encoder, LoggingConfig, Point, Profile,
    QueryBuilder, WriteRequest,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tempoiq-encode")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encode TempoIQ request bodies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print the encoded document
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a batch of points for submission
    Write {
        /// Input file with [[series]] entries
        input: PathBuf,
    },

    /// Encode device definitions for provisioning
    Create {
        /// Input file with [[devices]] entries
        input: PathBuf,
    },

    /// Encode a read query
    Read {
        /// Input file with a [query] table
        input: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Deserialize)]
struct WriteInput {
    #[serde(default)]
    series: Vec<SeriesInput>,
}

#[derive(Debug, Deserialize)]
struct SeriesInput {
    device: String,
    sensor: String,
    #[serde(default)]
    points: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct CreateInput {
    #[serde(default)]
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
struct ReadInput {
    query: QueryBuilder,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default(),
    };
    if cli.pretty {
        config.encoder.pretty = true;
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Write { input } => {
            let doc: WriteInput = load_input(&input)?;
            let request = doc
                .series
                .into_iter()
                .fold(WriteRequest::new(), |request, series| {
                    request.add(series.device, series.sensor, series.points)
                });

            tracing::info!(
                devices = request.device_count(),
                points = request.point_count(),
                "Encoding write request"
            );
            emit(&config.encoder(Profile::Write), &request)?;
        }

        Commands::Create { input } => {
            let doc: CreateInput = load_input(&input)?;
            tracing::info!(devices = doc.devices.len(), "Encoding device definitions");
            emit(&config.encoder(Profile::Create), &doc.devices)?;
        }

        Commands::Read { input } => {
            let doc: ReadInput = load_input(&input)?;
            tracing::info!(
                select = %doc.query.object_type,
                operation = %doc.query.operation.name,
                functions = doc.query.pipeline.len(),
                "Encoding read query"
            );
            emit(&config.encoder(Profile::Read), &doc.query)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the encoded document
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tempoiq_wire={0},tempoiq_encode={0}",
            logging.level
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Parse an input document, choosing JSON or TOML by file extension
fn load_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let doc = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    } else {
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))?
    };
    Ok(doc)
}

fn emit<T: Encodable + ?Sized>(encoder: &Encoder, value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    encoder
        .to_writer(&mut out, value)
        .with_context(|| format!("failed to encode with {} profile", encoder.profile()))?;
    writeln!(out)?;
    Ok(())
}
