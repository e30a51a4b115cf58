//! ccip-gateway: serves signed answers for ERC-3668 deferred lookups.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use ccip_gateway::{
    init_tracing, GatewayConfig, GatewayServer, GatewayService, InMemoryRecordSource,
    TelemetryConfig,
};
use ccip_resolver::adapters::SystemClock;
use shared_crypto::Secp256k1KeyPair;

/// Reference ERC-3668 gateway
#[derive(Parser, Debug)]
#[command(name = "ccip-gateway")]
#[command(about = "Answers deferred name lookups with signed responses")]
struct Args {
    /// Listen address
    #[arg(long)]
    host: Option<IpAddr>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds a signed response stays valid
    #[arg(short, long)]
    ttl: Option<u64>,

    /// Hex secp256k1 signing key (random when omitted)
    #[arg(long, env = "CCIP_GATEWAY_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// JSON file of `{ name, data, result }` records
    #[arg(short, long)]
    records: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry.json_logs |= args.json_logs;
    init_tracing(&telemetry).context("failed to initialize logging")?;

    let mut config = GatewayConfig::from_env().context("invalid environment configuration")?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(ttl) = args.ttl {
        config.signing.ttl_secs = ttl;
    }
    if args.private_key.is_some() {
        config.signing.private_key = args.private_key;
    }
    if args.records.is_some() {
        config.records.path = args.records;
    }
    config.validate().context("invalid configuration")?;

    let signer = match &config.signing.private_key {
        Some(key) => Secp256k1KeyPair::from_hex(key).context("invalid signing key")?,
        None => {
            warn!("No signing key configured; using an ephemeral key");
            Secp256k1KeyPair::generate()
        }
    };

    let records = match &config.records.path {
        Some(path) => InMemoryRecordSource::from_json_file(path)
            .with_context(|| format!("failed to load records from {}", path.display()))?,
        None => {
            warn!("No record file configured; every lookup will miss");
            InMemoryRecordSource::new()
        }
    };
    info!(records = records.len(), signer = %signer.address(), "Gateway ready");

    let service = GatewayService::new(
        signer,
        Arc::new(records),
        Arc::new(SystemClock),
        config.signing.ttl_secs,
    );

    GatewayServer::new(config, Arc::new(service))?
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
