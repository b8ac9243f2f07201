use std::{fmt, str::FromStr};

use base58::{FromBase58, ToBase58};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PrimitiveError;

/// Generic substrate address format.
pub const DEFAULT_SS58_PREFIX: u8 = 42;

const SS58_CHECKSUM_PREFIX: &[u8] = b"SS58PRE";
const SS58_CHECKSUM_LEN: usize = 2;

pub fn blake2_256(data: &[u8]) -> H256 {
    let hash = blake2b_simd::Params::new().hash_length(32).hash(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(hash.as_bytes());
    H256(out)
}

fn blake2_512(data: &[u8]) -> [u8; 64] {
    let hash = blake2b_simd::Params::new().hash_length(64).hash(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(hash.as_bytes());
    out
}

/// Strips one optional `0x` prefix and hex-decodes the rest.
pub fn decode_prefixed_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

pub fn encode_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct H256(pub [u8; 32]);

impl H256 {
    pub const fn zero() -> Self {
        H256([0; 32])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for H256 {
    fn from(value: [u8; 32]) -> Self {
        H256(value)
    }
}

impl TryFrom<&[u8]> for H256 {
    type Error = PrimitiveError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = value.try_into().map_err(|_| PrimitiveError::InvalidLength {
            expected: 32,
            actual: value.len(),
        })?;
        Ok(H256(bytes))
    }
}

impl FromStr for H256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        H256::try_from(decode_prefixed_hex(s)?.as_slice())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for H256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for H256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// sr25519 public key of a transaction signer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn to_ss58(&self, prefix: u8) -> String {
        let mut bytes = Vec::with_capacity(1 + 32 + SS58_CHECKSUM_LEN);
        bytes.push(prefix);
        bytes.extend_from_slice(&self.0);
        let checksum = ss58_checksum(&bytes);
        bytes.extend_from_slice(&checksum[..SS58_CHECKSUM_LEN]);
        bytes.to_base58()
    }

    pub fn from_ss58(s: &str) -> Result<(Self, u8), PrimitiveError> {
        let bytes = s.from_base58().map_err(|_| PrimitiveError::InvalidBase58)?;
        if bytes.len() != 1 + 32 + SS58_CHECKSUM_LEN {
            return Err(PrimitiveError::InvalidLength {
                expected: 1 + 32 + SS58_CHECKSUM_LEN,
                actual: bytes.len(),
            });
        }
        let prefix = bytes[0];
        if prefix >= 64 {
            return Err(PrimitiveError::UnsupportedSs58Prefix(prefix));
        }
        let (body, checksum) = bytes.split_at(1 + 32);
        if ss58_checksum(body)[..SS58_CHECKSUM_LEN] != *checksum {
            return Err(PrimitiveError::Ss58Checksum);
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&body[1..]);
        Ok((AccountId(key), prefix))
    }
}

fn ss58_checksum(body: &[u8]) -> [u8; 64] {
    let mut preimage = Vec::with_capacity(SS58_CHECKSUM_PREFIX.len() + body.len());
    preimage.extend_from_slice(SS58_CHECKSUM_PREFIX);
    preimage.extend_from_slice(body);
    blake2_512(&preimage)
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ss58(DEFAULT_SS58_PREFIX))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
