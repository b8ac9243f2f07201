use avail_e2e_lib::payload::random_hex_payload;
use futures::future::join_all;

use crate::{
    client::{
        block_scan::{scan_block, ScannedExtrinsic},
        client_with_signer::AvailClientWithSigner,
        tx_broadcast::{HarnessClientError, TxInBlock},
    },
    config::HarnessConfig,
    rpc_ext::AvailRpc,
};

#[derive(Debug)]
pub enum RunReport {
    /// One transaction, read back from its block.
    Single(ScannedExtrinsic),
    /// Every transaction of a batch, in nonce order.
    Batch(Vec<TxInBlock>),
}

fn next_payload(config: &HarnessConfig) -> Vec<u8> {
    match &config.data {
        Some(data) => data.clone().into_bytes(),
        None => random_hex_payload(config.size),
    }
}

pub async fn run<R: AvailRpc>(
    client: &AvailClientWithSigner<R>,
    config: &HarnessConfig,
) -> Result<RunReport, HarnessClientError> {
    if config.is_batch() {
        run_batch(client, config).await.map(RunReport::Batch)
    } else {
        run_single(client, config).await.map(RunReport::Single)
    }
}

/// Submits one transaction, waits for it, then reads the payload back out of
/// the inclusion block.
pub async fn run_single<R: AvailRpc>(
    client: &AvailClientWithSigner<R>,
    config: &HarnessConfig,
) -> Result<ScannedExtrinsic, HarnessClientError> {
    let nonce = client.next_nonce().await?;
    let pending = client.submit_data(&next_payload(config), nonce).await?;
    let included = pending
        .wait_for_with_timeout(config.wait_for, config.dispatch_timeout)
        .await?;

    if !config.scan_delay.is_zero() {
        tracing::debug!("Waiting {:?} before scanning", config.scan_delay);
        tokio::time::sleep(config.scan_delay).await;
    }

    scan_block(
        client.rpc_client(),
        &client.context().registry,
        included.block_hash,
        included.tx_hash,
    )
    .await?
    .ok_or(HarnessClientError::TxNotInBlock {
        tx_hash: included.tx_hash,
        block_hash: included.block_hash,
    })
}

/// Fires the whole batch first, then watches all transactions together.
/// Fails with the first error once every transaction has settled.
pub async fn run_batch<R: AvailRpc>(
    client: &AvailClientWithSigner<R>,
    config: &HarnessConfig,
) -> Result<Vec<TxInBlock>, HarnessClientError> {
    let nonce = client.next_nonce().await?;
    let pending = client
        .submit_batch(config.batch, nonce, |_| next_payload(config))
        .await?;

    let results = join_all(
        pending
            .into_iter()
            .map(|tx| tx.wait_for_with_timeout(config.wait_for, config.dispatch_timeout)),
    )
    .await;

    let mut included = Vec::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok(tx) => included.push(tx),
            Err(err) => {
                tracing::error!("Batch transaction failed: {}", err);
                first_error.get_or_insert(err);
            }
        }
    }
    tracing::info!(
        "{} of {} batch transactions included",
        included.len(),
        config.batch
    );
    match first_error {
        Some(err) => Err(err),
        None => Ok(included),
    }
}
