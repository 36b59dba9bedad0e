//! # ipr CLI entry point
//!
//! Standalone pinning utility. Pins local files, JSON documents, and
//! remote URLs to the configured Pinata gateway and prints the resulting
//! CID, gateway URL, and content digest. Reads the same `PINATA_*`
//! environment variables as the API service.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ipr_core::{sha256_bytes, CanonicalBytes};
use ipr_pinata::{PinataClient, PinataConfig};

/// IP registrar pinning utility.
///
/// Uploads content to the configured pinning gateway so it is
/// retrievable by content identifier, without going through the
/// registration API.
#[derive(Parser, Debug)]
#[command(name = "ipr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pin a local file.
    File {
        /// Path of the file to pin.
        path: PathBuf,
        /// MIME type to declare. Defaults to application/octet-stream.
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Canonicalize and pin a JSON document from a local file.
    Json {
        /// Path of the JSON document.
        path: PathBuf,
    },
    /// Fetch a remote URL and pin its content.
    Url {
        /// Absolute URL to fetch.
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = PinataConfig::from_env()?;
    let client = PinataClient::new(config)?;

    match command {
        Commands::File { path, content_type } => {
            let bytes = std::fs::read(&path)?;
            let digest = sha256_bytes(&bytes);
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| digest.to_hex());
            let content_type =
                content_type.unwrap_or_else(|| "application/octet-stream".to_string());

            let cid = client.pin_file(&filename, &content_type, bytes).await?;
            print_result(&client, &cid, &digest.to_hex_prefixed());
        }
        Commands::Json { path } => {
            let raw = std::fs::read_to_string(&path)?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            let document = CanonicalBytes::new(&value)?;

            let pin = client.pin_json(&document).await?;
            print_result(&client, &pin.ipfs_cid, &pin.digest.to_hex_prefixed());
        }
        Commands::Url { url } => {
            let upload = client.upload_content(&url).await?;
            println!("contentType: {}", upload.content_type);
            print_result(
                &client,
                &upload.ipfs_cid,
                &upload.content_hash.to_hex_prefixed(),
            );
        }
    }

    Ok(())
}

fn print_result(client: &PinataClient, cid: &str, digest: &str) {
    println!("cid: {cid}");
    println!("url: {}", client.gateway_url(cid));
    println!("sha256: {digest}");
}
