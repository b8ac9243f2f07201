use std::{str::FromStr, time::Duration};

use anyhow::Context;
use avail_e2e_lib::primitives::AppId;
use jsonrpsee::ws_client::WsClient;
use subxt_signer::{sr25519::Keypair, SecretUri};

use crate::{
    client::tx_broadcast::{HarnessClientError, WaitFor},
    rpc_ext::connect_ws,
};

pub const LOCAL_NODE_URL: &str = "ws://127.0.0.1:9944";
pub const TURING_NODE_URL: &str = "wss://turing-rpc.avail.so/ws";
pub const DEV_SECRET_URI: &str = "//Alice";

pub const DEFAULT_APP_ID: u32 = 1;
pub const DEFAULT_DATA_SIZE: usize = 100;
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(180);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which preset the harness starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Network {
    /// A local dev node with the `//Alice` account.
    #[default]
    Dev,
    Turing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub api_url: String,
    /// `//Alice`, a mnemonic phrase, or a hex seed, optionally with derivation junctions.
    pub secret_uri: String,
    pub app_id: AppId,
    /// Random bytes per submission. Ignored when `data` is set.
    pub size: usize,
    pub data: Option<String>,
    pub batch: u32,
    pub wait_for: WaitFor,
    /// Pause between inclusion and the block scan.
    pub scan_delay: Duration,
    pub dispatch_timeout: Duration,
    pub request_timeout: Duration,
}

impl HarnessConfig {
    pub fn dev() -> Self {
        Self {
            api_url: LOCAL_NODE_URL.to_string(),
            secret_uri: DEV_SECRET_URI.to_string(),
            app_id: AppId(DEFAULT_APP_ID),
            size: DEFAULT_DATA_SIZE,
            data: None,
            batch: 1,
            wait_for: WaitFor::InBlock,
            scan_delay: DEFAULT_SCAN_DELAY,
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Turing testnet. The secret has to come from the environment.
    pub fn turing(secret_uri: String) -> Self {
        Self {
            api_url: TURING_NODE_URL.to_string(),
            secret_uri,
            wait_for: WaitFor::Finalized,
            ..Self::dev()
        }
    }

    /// The preset of `network`. Turing has no default account, so it needs
    /// `secret_uri`.
    pub fn for_network(
        network: Network,
        secret_uri: Option<String>,
    ) -> Result<Self, HarnessClientError> {
        match (network, secret_uri) {
            (Network::Dev, None) => Ok(Self::dev()),
            (Network::Dev, Some(secret_uri)) => Ok(Self {
                secret_uri,
                ..Self::dev()
            }),
            (Network::Turing, Some(secret_uri)) => Ok(Self::turing(secret_uri)),
            (Network::Turing, None) => {
                Err(anyhow::anyhow!("the turing network needs a secret uri").into())
            }
        }
    }

    pub fn signer(&self) -> Result<Keypair, HarnessClientError> {
        let uri = SecretUri::from_str(&self.secret_uri)
            .map_err(|e| anyhow::anyhow!("invalid secret uri: {e}"))?;
        Ok(Keypair::from_uri(&uri)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("failed to derive sr25519 keypair")?)
    }

    pub async fn rpc_client(&self) -> Result<WsClient, HarnessClientError> {
        connect_ws(&self.api_url, self.request_timeout).await
    }

    pub fn is_batch(&self) -> bool {
        self.batch > 1
    }
}
