use serde::{Deserialize, Serialize};

use crate::{
    kate::HeaderExtension,
    primitives::{decode_prefixed_hex, H256},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
    pub transaction_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub parent_hash: H256,
    /// Hex encoded block number, e.g. `"0x1a"`.
    pub number: String,
    pub state_root: H256,
    pub extrinsics_root: H256,
    #[serde(default)]
    pub extension: Option<serde_json::Value>,
}

impl Header {
    pub fn block_number(&self) -> Option<u32> {
        u32::from_str_radix(self.number.strip_prefix("0x").unwrap_or(&self.number), 16).ok()
    }

    /// The typed header extension, when it is a layout this crate knows.
    pub fn extension(&self) -> Option<HeaderExtension> {
        serde_json::from_value(self.extension.clone()?).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    /// Hex encoded, length prefixed extrinsics.
    pub extrinsics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedBlock {
    pub block: Block,
    #[serde(default)]
    pub justifications: Option<serde_json::Value>,
}

impl SignedBlock {
    pub fn extrinsic_bytes(&self) -> impl Iterator<Item = Result<Vec<u8>, hex::FromHexError>> + '_ {
        self.block.extrinsics.iter().map(|ext| decode_prefixed_hex(ext))
    }
}

/// Pool status notifications of `author_submitAndWatchExtrinsic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus {
    Future,
    Ready,
    Broadcast(Vec<String>),
    InBlock(H256),
    Retracted(H256),
    FinalityTimeout(H256),
    Finalized(H256),
    Usurped(H256),
    Dropped,
    Invalid,
}

impl TransactionStatus {
    /// No further notification follows a final status.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Finalized(_)
                | TransactionStatus::FinalityTimeout(_)
                | TransactionStatus::Usurped(_)
                | TransactionStatus::Dropped
                | TransactionStatus::Invalid
        )
    }
}
