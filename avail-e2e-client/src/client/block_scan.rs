use std::fmt;

use avail_e2e_lib::{
    call::CallRegistry,
    extrinsic::UncheckedExtrinsic,
    payload::{decode_hex_argument, join_call_args},
    primitives::{blake2_256, encode_prefixed_hex, H256},
};
use itertools::Itertools;

use crate::{client::tx_broadcast::HarnessClientError, rpc_ext::AvailRpc};

/// A transaction located inside a block, with its call decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedExtrinsic {
    pub block_hash: H256,
    pub block_number: Option<u32>,
    /// Data root committed in the header extension.
    pub data_root: Option<H256>,
    pub index: usize,
    pub tx_hash: H256,
    pub extrinsic: UncheckedExtrinsic,
    pub pallet: String,
    pub call: String,
    /// Call arguments, `0x` hex.
    pub args: Vec<String>,
    /// The arguments decoded back to text.
    pub data: String,
}

impl fmt::Display for ScannedExtrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_number {
            Some(number) => writeln!(
                f,
                "Tx included in block number {} with hash {}",
                number, self.block_hash
            )?,
            None => writeln!(f, "Tx included in block {}", self.block_hash)?,
        }
        writeln!(f, "{} {:#?}", self.index, self.extrinsic)?;
        writeln!(f, "DATA_SUBMITTED: {}", self.data)?;
        write!(f, "{}.{}({})", self.pallet, self.call, self.args.iter().join(", "))
    }
}

/// Finds `tx_hash` among the extrinsics of `block_hash` and decodes it.
///
/// Returns `Ok(None)` when the block holds no such transaction.
#[tracing::instrument(skip(rpc, registry))]
pub async fn scan_block<R: AvailRpc>(
    rpc: &R,
    registry: &CallRegistry,
    block_hash: H256,
    tx_hash: H256,
) -> Result<Option<ScannedExtrinsic>, HarnessClientError> {
    let block = rpc
        .get_block(&block_hash)
        .await?
        .ok_or(HarnessClientError::BlockNotFound(block_hash))?;
    let block_number = block.block.header.block_number();
    let data_root = block
        .block
        .header
        .extension()
        .map(|extension| extension.commitment().data_root);
    tracing::debug!(
        "Scanning {} extrinsics of block {:?}",
        block.block.extrinsics.len(),
        block_number
    );

    for (index, bytes) in block.extrinsic_bytes().enumerate() {
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Skipping extrinsic {} of block {}: {}", index, block_hash, err);
                continue;
            }
        };
        if blake2_256(&bytes) != tx_hash {
            continue;
        }
        let extrinsic = UncheckedExtrinsic::decode(&bytes)?;
        let (pallet, call) = match registry.name(&extrinsic.call.index) {
            Some(name) => (name.pallet.clone(), name.call.clone()),
            None => ("unknown".to_string(), "unknown".to_string()),
        };
        let raw_args = call_arguments(&extrinsic);
        let data = decode_hex_argument(&join_call_args(raw_args.iter().map(Vec::as_slice)));
        return Ok(Some(ScannedExtrinsic {
            block_hash,
            block_number,
            data_root,
            index,
            tx_hash,
            pallet,
            call,
            args: raw_args.iter().map(|arg| encode_prefixed_hex(arg)).collect(),
            data,
            extrinsic,
        }));
    }
    tracing::warn!("Tx {} not found in block {}", tx_hash, block_hash);
    Ok(None)
}

/// `submit_data` carries one byte vector; anything else is shown as its
/// raw argument bytes.
fn call_arguments(extrinsic: &UncheckedExtrinsic) -> Vec<Vec<u8>> {
    match extrinsic.call.data_argument() {
        Ok(data) => vec![data],
        Err(_) if extrinsic.call.args.is_empty() => vec![],
        Err(_) => vec![extrinsic.call.args.clone()],
    }
}
