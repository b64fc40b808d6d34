use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::native_token::{lamports_to_sol, sol_to_lamports};
use tracing::info;
use tracing_subscriber::EnvFilter;

use latitude_mint::interfaces::{FixedLocation, GeoLocator};
use latitude_mint::state::{GeoTag, LocationOptions};
use latitude_mint::{
    AppConfig, KeypairWallet, LedgerClient, MintPipeline, MintRequest, PinataClient, RpcLedger,
};

#[derive(Parser, Debug)]
#[command(name = "latitude-mint", about = "Mint geotagged photos as Solana NFTs")]
struct Cli {
    /// Solana keypair acting as the connected wallet
    #[arg(long, env = "LATITUDE_KEYPAIR", default_value = "~/.config/solana/id.json", global = true)]
    keypair: String,

    /// RPC endpoint, overrides LATITUDE_RPC_URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pin a photo and its metadata, then mint it
    Mint {
        /// Photo path or file:// URI
        #[arg(long)]
        photo: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Show the wallet balance
    Balance,
    /// Request devnet SOL for the wallet
    Airdrop {
        #[arg(long, default_value_t = 1.0)]
        sol: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("loading configuration")?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }

    let wallet = KeypairWallet::from_file(&expand_home(&cli.keypair))
        .with_context(|| format!("opening wallet {}", cli.keypair))?;
    let owner = wallet.pubkey();
    let ledger = RpcLedger::new(config.rpc_url.clone());
    info!(cluster = %ledger.url(), %owner, "wallet connected");

    match cli.command {
        Command::Balance => {
            let lamports = ledger.balance(&owner).await?;
            println!("{owner}: {} SOL", lamports_to_sol(lamports));
        }
        Command::Airdrop { sol } => {
            let signature = ledger.request_airdrop(&owner, sol_to_lamports(sol)).await?;
            println!("airdrop requested: {signature}");
        }
        Command::Mint { photo, lat, lon } => {
            let geo_tag = FixedLocation(GeoTag::new(lat, lon))
                .current_position(LocationOptions::default())
                .await
                .context("reading location")?;
            let pinning = PinataClient::new(config.pinning()?);
            let pipeline = MintPipeline::new(config.pipeline.clone(), pinning, ledger, wallet);

            let balance = pipeline.wallet_balance(&owner).await?;
            info!(sol = lamports_to_sol(balance), "payer balance");

            let request = MintRequest::new(photo, owner).with_geo_tag(geo_tag);
            match pipeline.mint(request).await {
                Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                Err(err) if err.is_outcome_unknown() => {
                    anyhow::bail!("{err}; check the signature on an explorer before minting again")
                }
                Err(err) => return Err(err).context("mint failed"),
            }
        }
    }
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
