use std::time::Duration;

use avail_e2e_client::{
    client::{
        block_scan::scan_block,
        client_with_signer::AvailClientWithSigner,
        runner::{run, RunReport},
        tx_broadcast::{HarnessClientError, WaitFor},
    },
    config::{HarnessConfig, Network},
    rpc_ext::AvailRpc,
};
use avail_e2e_lib::{
    kate::Cell,
    primitives::{encode_prefixed_hex, AppId, H256},
};
use clap::Parser;
use tracing::Instrument;

/// Bytes of one cell proof returned by `kate_queryProof`.
const CELL_PROOF_LEN: usize = 80;

/// Settings left out fall back to the `--network` preset.
#[derive(clap::Parser, Debug)]
struct Args {
    #[clap(long, env = "AVAIL_NETWORK", value_enum, default_value_t = Network::Dev)]
    network: Network,
    #[clap(long, env = "AVAIL_API_URL")]
    api_url: Option<String>,
    #[clap(long, env = "AVAIL_SECRET_URI", hide_env_values = true)]
    secret_uri: Option<String>,
    #[clap(long, env = "AVAIL_APP_ID")]
    app_id: Option<u32>,
    /// Length of the random payload.
    #[clap(long, env = "AVAIL_DATA_SIZE")]
    size: Option<usize>,
    /// Submit this text instead of a random payload.
    #[clap(long, env = "AVAIL_DATA")]
    data: Option<String>,
    /// Transactions to fire back to back. Above 1 the block scan is skipped.
    #[clap(long, env = "AVAIL_BATCH")]
    batch: Option<u32>,
    #[clap(long, env = "AVAIL_WAIT_FOR", value_enum)]
    wait_for: Option<WaitFor>,
    #[clap(long)]
    scan_delay_secs: Option<u64>,
    #[clap(long)]
    dispatch_timeout_secs: Option<u64>,
    #[clap(long)]
    request_timeout_secs: Option<u64>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Submit data and read it back. This is the default.
    Submit,
    /// Print the block dimensions.
    BlockLength {
        #[clap(long)]
        at: Option<H256>,
    },
    /// Print the proofs of the given `row:col` cells.
    QueryProof {
        #[clap(long, value_delimiter = ',', required = true)]
        cells: Vec<Cell>,
        #[clap(long)]
        at: Option<H256>,
    },
    /// Print the merkle proof of one data submission.
    DataProof {
        #[clap(long)]
        index: u32,
        #[clap(long)]
        at: Option<H256>,
    },
    /// Look up a transaction in a block and decode its data.
    Scan {
        #[clap(long)]
        block: H256,
        #[clap(long)]
        tx: H256,
    },
}

impl Args {
    fn config(&self) -> Result<HarnessConfig, HarnessClientError> {
        let preset = HarnessConfig::for_network(self.network, self.secret_uri.clone())?;
        Ok(HarnessConfig {
            api_url: self.api_url.clone().unwrap_or(preset.api_url),
            app_id: self.app_id.map_or(preset.app_id, AppId),
            size: self.size.unwrap_or(preset.size),
            data: self.data.clone().or(preset.data),
            batch: self.batch.unwrap_or(preset.batch),
            wait_for: self.wait_for.unwrap_or(preset.wait_for),
            scan_delay: self
                .scan_delay_secs
                .map_or(preset.scan_delay, Duration::from_secs),
            dispatch_timeout: self
                .dispatch_timeout_secs
                .map_or(preset.dispatch_timeout, Duration::from_secs),
            request_timeout: self
                .request_timeout_secs
                .map_or(preset.request_timeout, Duration::from_secs),
            secret_uri: preset.secret_uri,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), HarnessClientError> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = args.config()?;
    let span = tracing::info_span!("e2e", run_id = %uuid::Uuid::new_v4());
    execute(args.command.unwrap_or(Command::Submit), &config)
        .instrument(span)
        .await
}

async fn execute(command: Command, config: &HarnessConfig) -> Result<(), HarnessClientError> {
    let rpc = config.rpc_client().await?;
    match command {
        Command::Submit => {
            let client =
                AvailClientWithSigner::connect(rpc, config.signer()?, config.app_id).await?;
            match run(&client, config).await? {
                RunReport::Single(scanned) => println!("{scanned}"),
                RunReport::Batch(included) => {
                    for tx in included {
                        println!(
                            "Tx {} with nonce {} included in block {}",
                            tx.tx_hash, tx.nonce, tx.block_hash
                        );
                    }
                }
            }
        }
        Command::BlockLength { at } => {
            let length = rpc.block_length(at).await?;
            println!("{}", serde_json::to_string_pretty(&length)?);
        }
        Command::QueryProof { cells, at } => {
            let proof = rpc.query_proof(cells.clone(), at).await?;
            for (cell, chunk) in cells.iter().zip(proof.chunks(CELL_PROOF_LEN)) {
                println!("{}: {}", cell, encode_prefixed_hex(chunk));
            }
        }
        Command::DataProof { index, at } => {
            let proof = rpc.query_data_proof(index, at).await?;
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        Command::Scan { block, tx } => {
            let registry = rpc.call_registry().await?;
            let scanned = scan_block(&rpc, &registry, block, tx)
                .await?
                .ok_or(HarnessClientError::TxNotInBlock {
                    tx_hash: tx,
                    block_hash: block,
                })?;
            println!("{scanned}");
        }
    }
    Ok(())
}
