use parity_scale_codec::Encode;

use crate::primitives::{blake2_256, H256};

use super::{RawCall, SignedExtra};

/// Payloads above this size are hashed before signing.
const MAX_UNHASHED_PAYLOAD_LEN: usize = 256;

/// Signed extension data that is signed over but never sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode)]
pub struct AdditionalSigned {
    pub spec_version: u32,
    pub transaction_version: u32,
    pub genesis_hash: H256,
    /// Era checkpoint; genesis for immortal transactions.
    pub checkpoint: H256,
}

impl AdditionalSigned {
    pub fn immortal(spec_version: u32, transaction_version: u32, genesis_hash: H256) -> Self {
        AdditionalSigned {
            spec_version,
            transaction_version,
            genesis_hash,
            checkpoint: genesis_hash,
        }
    }
}

pub struct SignerPayload<'a> {
    pub call: &'a RawCall,
    pub extra: &'a SignedExtra,
    pub additional: &'a AdditionalSigned,
}

impl SignerPayload<'_> {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.call.encode();
        self.extra.encode_to(&mut bytes);
        self.additional.encode_to(&mut bytes);
        bytes
    }

    /// The bytes that get signed.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let payload = self.encode();
        if payload.len() > MAX_UNHASHED_PAYLOAD_LEN {
            blake2_256(&payload).0.to_vec()
        } else {
            payload
        }
    }
}
