// ============================================
// File: crates/hubcast-client/src/main.rs
// ============================================
//! # Hubcast CLI Entry Point
//!
//! ## Creation Reason
//! Small operator tool exercising the full pipeline: build a typed
//! message, sign it, and submit it through the failover client.
//!
//! ## Main Functionality
//! - CLI argument parsing with clap
//! - Logging initialization with tracing
//! - Configuration loading
//! - Cast submission, hub probing, key inspection
//!
//! ## Usage
//! ```bash
//! # Submit a cast through the configured hubs
//! hubcast cast --fid 123 --text "hello world" --key <64-hex-chars>
//!
//! # Probe the configured hubs and print the best one
//! hubcast probe
//!
//! # Show metadata for the first configured hub
//! hubcast info
//!
//! # Derive the public key for a signer seed
//! hubcast pubkey --key <64-hex-chars>
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The signer key may come from `--key` or the `HUBCAST_SIGNER_KEY`
//!   environment variable; it is never written anywhere
//! - Exit code 1 on any failure so scripts can branch on it
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hubcast_client::{select_best_hub, ClientConfig, FailoverClient, HubClient};
use hubcast_common::time::FarcasterTime;
use hubcast_common::types::Fid;
use hubcast_core::crypto::MessageSigner;
use hubcast_core::protocol::{
    CastAddBody, FarcasterNetwork, MessageBody, MessageData, MessageType,
};
use hubcast_core::Message;

// ============================================
// CLI Definition
// ============================================

/// Hubcast - sign and submit hub protocol messages
#[derive(Parser, Debug)]
#[command(name = "hubcast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hubcast.toml", global = true)]
    config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a cast through the configured hubs
    Cast {
        /// Author FID
        #[arg(long)]
        fid: u64,

        /// Cast text
        #[arg(long)]
        text: String,

        /// Target network (mainnet, testnet, devnet)
        #[arg(long, default_value = "mainnet")]
        network: String,

        /// Signer seed as 64 hex chars (falls back to HUBCAST_SIGNER_KEY)
        #[arg(long)]
        key: Option<String>,
    },

    /// Probe the configured hubs and print the best one
    Probe {
        /// Per-hub probe timeout in milliseconds
        #[arg(long, default_value_t = 2000)]
        timeout_ms: u64,
    },

    /// Show metadata for the first configured hub
    Info,

    /// Derive the public key for a signer seed
    Pubkey {
        /// Signer seed as 64 hex chars (falls back to HUBCAST_SIGNER_KEY)
        #[arg(long)]
        key: Option<String>,
    },
}

// ============================================
// Entry Point
// ============================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            // The subscriber may not be installed yet if config loading
            // failed, so report on stderr directly
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = ClientConfig::load(&cli.config)
        .await
        .map_err(|e| format!("Failed to load configuration: {e}"))?;

    init_logging(&config.logging.level);

    match cli.command {
        Commands::Cast {
            fid,
            text,
            network,
            key,
        } => cast(&config, fid, &text, &network, key).await,
        Commands::Probe { timeout_ms } => probe(&config, timeout_ms).await,
        Commands::Info => info_command(&config).await,
        Commands::Pubkey { key } => pubkey(key),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

// ============================================
// Commands
// ============================================

async fn cast(
    config: &ClientConfig,
    fid: u64,
    text: &str,
    network: &str,
    key: Option<String>,
) -> Result<(), String> {
    let signer = load_signer(key)?;
    let network = parse_network(network)?;

    let data = MessageData::new(
        MessageType::CastAdd,
        Fid::new(fid),
        FarcasterTime::now(),
        network,
        MessageBody::CastAdd(CastAddBody::from_text(text)),
    )
    .map_err(|e| format!("Invalid message data: {e}"))?;

    let message =
        Message::build(data, &signer).map_err(|e| format!("Failed to build message: {e}"))?;

    info!(hash = %message.hash(), "submitting cast");

    let client = FailoverClient::new(config.hubs.clone(), config.submit.clone())
        .map_err(|e| format!("Failed to construct client: {e}"))?;
    let result = client.submit(&message).await;

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| format!("Failed to render result: {e}"))?;
    println!("{rendered}");

    if result.success {
        Ok(())
    } else {
        Err("submission failed".to_string())
    }
}

async fn probe(config: &ClientConfig, timeout_ms: u64) -> Result<(), String> {
    match select_best_hub(&config.hubs, timeout_ms).await {
        Some(hub) => {
            println!("{} (priority {})", hub.url, hub.priority);
            Ok(())
        }
        None => Err("no available hubs".to_string()),
    }
}

async fn info_command(config: &ClientConfig) -> Result<(), String> {
    let hub = config
        .hubs
        .first()
        .ok_or_else(|| "no hubs configured".to_string())?;
    let client = HubClient::new(&hub.url, config.submit.clone())
        .map_err(|e| format!("Failed to construct client: {e}"))?;
    let info = client
        .hub_info()
        .await
        .map_err(|e| format!("Failed to fetch hub info: {e}"))?;

    let rendered = serde_json::to_string_pretty(&info)
        .map_err(|e| format!("Failed to render info: {e}"))?;
    println!("{rendered}");
    Ok(())
}

fn pubkey(key: Option<String>) -> Result<(), String> {
    let signer = load_signer(key)?;
    println!("{}", signer.public_key());
    Ok(())
}

// ============================================
// Helpers
// ============================================

fn load_signer(key: Option<String>) -> Result<MessageSigner, String> {
    let key_hex = match key {
        Some(key) => key,
        None => std::env::var("HUBCAST_SIGNER_KEY")
            .map_err(|_| "no signer key: pass --key or set HUBCAST_SIGNER_KEY".to_string())?,
    };
    let seed = hex::decode(key_hex.trim()).map_err(|e| format!("Invalid key hex: {e}"))?;
    MessageSigner::from_bytes(&seed).map_err(|e| format!("Invalid signer key: {e}"))
}

fn parse_network(network: &str) -> Result<FarcasterNetwork, String> {
    match network.to_ascii_lowercase().as_str() {
        "mainnet" => Ok(FarcasterNetwork::Mainnet),
        "testnet" => Ok(FarcasterNetwork::Testnet),
        "devnet" => Ok(FarcasterNetwork::Devnet),
        other => Err(format!(
            "unknown network '{other}' (expected mainnet, testnet, or devnet)"
        )),
    }
}
