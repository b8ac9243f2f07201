use std::time::Duration;

use avail_e2e_lib::{
    block::TransactionStatus,
    error::{ExtrinsicError, PrimitiveError},
    extrinsic::UncheckedExtrinsic,
    primitives::H256,
};
use futures::StreamExt;

use crate::rpc_ext::{AvailRpc, TxStatusStream};

/// Status a submitted transaction has to reach before it counts as done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WaitFor {
    #[default]
    InBlock,
    Finalized,
}

pub struct AvailTxBroadcast<'a, R: AvailRpc> {
    pub rpc: &'a R,
}

impl<'a, R: AvailRpc> AvailTxBroadcast<'a, R> {
    /// Hands the transaction to the node and returns as soon as the node
    /// accepted it. Inclusion is tracked through the returned [`PendingTx`].
    pub async fn broadcast_transaction(
        &self,
        transaction: &UncheckedExtrinsic,
    ) -> Result<PendingTx, HarnessClientError> {
        let nonce = transaction.nonce().unwrap_or_default();
        let bytes = transaction.to_bytes();
        let tx_hash = transaction.hash();
        tracing::info!("Sending tx {} with nonce {}", tx_hash, nonce);
        let statuses = self.rpc.submit_and_watch(&bytes).await?;
        Ok(PendingTx {
            nonce,
            tx_hash,
            statuses,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxInBlock {
    pub nonce: u32,
    pub tx_hash: H256,
    pub block_hash: H256,
    pub finalized: bool,
}

/// A transaction accepted by the node whose inclusion is still pending.
pub struct PendingTx {
    pub nonce: u32,
    pub tx_hash: H256,
    statuses: TxStatusStream,
}

impl std::fmt::Debug for PendingTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTx")
            .field("nonce", &self.nonce)
            .field("tx_hash", &self.tx_hash)
            .finish()
    }
}

impl PendingTx {
    pub fn new(nonce: u32, tx_hash: H256, statuses: TxStatusStream) -> Self {
        PendingTx {
            nonce,
            tx_hash,
            statuses,
        }
    }

    #[tracing::instrument(name = "wait_tx", skip_all, fields(nonce = self.nonce, tx = %self.tx_hash))]
    pub async fn wait_for(mut self, wait_for: WaitFor) -> Result<TxInBlock, HarnessClientError> {
        let mut in_block = None;
        while let Some(status) = self.statuses.next().await {
            let status = status?;
            match status {
                TransactionStatus::Ready => {
                    tracing::info!("result is ready with nonce {}", self.nonce);
                }
                TransactionStatus::InBlock(block_hash) => {
                    tracing::info!(
                        "Extrinsic hash: {} with nonce {} is in block {}",
                        self.tx_hash,
                        self.nonce,
                        block_hash
                    );
                    in_block = Some(block_hash);
                    if wait_for == WaitFor::InBlock {
                        return Ok(self.included(block_hash, false));
                    }
                }
                TransactionStatus::Retracted(block_hash) => {
                    tracing::warn!("Block {} retracted, waiting for re-inclusion", block_hash);
                    in_block = None;
                }
                TransactionStatus::Finalized(block_hash) => {
                    tracing::info!("Tx {} finalized in block {}", self.tx_hash, block_hash);
                    return Ok(self.included(block_hash, true));
                }
                failed if failed.is_final() => {
                    tracing::error!("Tx {} FAILED with status {:?}", self.tx_hash, failed);
                    return Err(HarnessClientError::TxFailed {
                        tx_hash: self.tx_hash,
                        nonce: self.nonce,
                        status: failed,
                    });
                }
                other => tracing::debug!("Tx status: {:?}", other),
            }
        }
        Err(HarnessClientError::StatusStreamClosed {
            tx_hash: self.tx_hash,
            wait_for,
            last_block: in_block,
        })
    }

    pub async fn wait_for_with_timeout(
        self,
        wait_for: WaitFor,
        timeout: Duration,
    ) -> Result<TxInBlock, HarnessClientError> {
        let tx_hash = self.tx_hash;
        tokio::time::timeout(timeout, self.wait_for(wait_for))
            .await
            .map_err(|_| HarnessClientError::Timeout { timeout, tx_hash })?
    }

    fn included(&self, block_hash: H256, finalized: bool) -> TxInBlock {
        TxInBlock {
            nonce: self.nonce,
            tx_hash: self.tx_hash,
            block_hash,
            finalized,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarnessClientError {
    #[error("transaction {tx_hash} with nonce {nonce} failed with status {status:?}")]
    TxFailed {
        tx_hash: H256,
        nonce: u32,
        status: TransactionStatus,
    },
    #[error("status stream of {tx_hash} closed before reaching {wait_for:?}, last block = {last_block:?}")]
    StatusStreamClosed {
        tx_hash: H256,
        wait_for: WaitFor,
        last_block: Option<H256>,
    },
    #[error("timed out after {timeout:?} waiting for {tx_hash}")]
    Timeout { timeout: Duration, tx_hash: H256 },
    #[error("block {0} not found")]
    BlockNotFound(H256),
    #[error("transaction {tx_hash} not found in block {block_hash}")]
    TxNotInBlock { tx_hash: H256, block_hash: H256 },
    #[error("runtime has no {0} call")]
    MissingCall(&'static str),
    #[error("nonce overflow after {0}")]
    NonceOverflow(u32),
    #[error("RPC error: {0}")]
    Rpc(#[from] jsonrpsee::core::ClientError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Extrinsic error: {0}")]
    Extrinsic(#[from] ExtrinsicError),
    #[error("Invalid value: {0}")]
    Primitive(#[from] PrimitiveError),
    #[error("An error occurred: {0}")]
    Other(#[from] anyhow::Error),
}

impl PartialEq<TransactionStatus> for HarnessClientError {
    fn eq(&self, other: &TransactionStatus) -> bool {
        match self {
            HarnessClientError::TxFailed { status, .. } => status == other,
            _ => false,
        }
    }
}
