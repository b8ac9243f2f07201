//! Version 4 extrinsics as accepted by an Avail node.
//!
//! ```text
//! extrinsic = Compact(len) ‖ version ‖ [address ‖ signature ‖ extra] ‖ call
//! ```

mod decode;
mod encode;

pub use encode::{AdditionalSigned, SignerPayload};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use parity_scale_codec::{Compact, Decode, Encode, Input, Output};

use crate::{
    error::ExtrinsicError,
    primitives::{blake2_256, AccountId, AppId, H256},
};

pub const EXTRINSIC_FORMAT_VERSION: u8 = 4;
pub const SIGNED_FLAG: u8 = 0b1000_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ExtrinsicVersion {
    Unsigned = EXTRINSIC_FORMAT_VERSION,
    Signed = SIGNED_FLAG | EXTRINSIC_FORMAT_VERSION,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum MultiAddress {
    #[codec(index = 0)]
    Id(AccountId),
    #[codec(index = 1)]
    Index(#[codec(compact)] u32),
    #[codec(index = 2)]
    Raw(Vec<u8>),
    #[codec(index = 3)]
    Address32([u8; 32]),
    #[codec(index = 4)]
    Address20([u8; 20]),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum MultiSignature {
    #[codec(index = 0)]
    Ed25519([u8; 64]),
    #[codec(index = 1)]
    Sr25519([u8; 64]),
    #[codec(index = 2)]
    Ecdsa([u8; 65]),
}

/// Transaction lifetime. Mortal eras are kept in their raw two-byte form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Era {
    #[default]
    Immortal,
    Mortal(u16),
}

impl Encode for Era {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        match self {
            Era::Immortal => dest.push_byte(0),
            Era::Mortal(raw) => dest.write(&raw.to_le_bytes()),
        }
    }
}

impl Decode for Era {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let first = input.read_byte()?;
        if first == 0 {
            return Ok(Era::Immortal);
        }
        let second = input.read_byte()?;
        Ok(Era::Mortal(u16::from_le_bytes([first, second])))
    }
}

/// Signed extensions that travel inside the extrinsic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct SignedExtra {
    pub era: Era,
    #[codec(compact)]
    pub nonce: u32,
    #[codec(compact)]
    pub tip: u128,
    #[codec(compact)]
    pub app_id: u32,
}

impl SignedExtra {
    pub fn immortal(nonce: u32, app_id: AppId) -> Self {
        SignedExtra {
            era: Era::Immortal,
            nonce,
            tip: 0,
            app_id: app_id.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtrinsicSignature {
    pub address: MultiAddress,
    pub signature: MultiSignature,
    pub extra: SignedExtra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallIndex {
    pub pallet: u8,
    pub call: u8,
}

/// A call whose arguments are kept SCALE-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCall {
    pub index: CallIndex,
    pub args: Vec<u8>,
}

impl RawCall {
    pub fn submit_data(index: CallIndex, data: &[u8]) -> Self {
        RawCall {
            index,
            args: data.encode(),
        }
    }

    /// Decodes the single `Vec<u8>` argument of a `submit_data` call.
    pub fn data_argument(&self) -> Result<Vec<u8>, ExtrinsicError> {
        let mut input = self.args.as_slice();
        let data = Vec::<u8>::decode(&mut input)?;
        if !input.is_empty() {
            return Err(ExtrinsicError::TrailingBytes(input.len()));
        }
        Ok(data)
    }
}

impl Encode for RawCall {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.push_byte(self.index.pallet);
        dest.push_byte(self.index.call);
        dest.write(&self.args);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UncheckedExtrinsic {
    pub signature: Option<ExtrinsicSignature>,
    pub call: RawCall,
}

impl UncheckedExtrinsic {
    pub fn new_unsigned(call: RawCall) -> Self {
        UncheckedExtrinsic {
            signature: None,
            call,
        }
    }

    pub fn new_signed(
        call: RawCall,
        signer: AccountId,
        signature: [u8; 64],
        extra: SignedExtra,
    ) -> Self {
        UncheckedExtrinsic {
            signature: Some(ExtrinsicSignature {
                address: MultiAddress::Id(signer),
                signature: MultiSignature::Sr25519(signature),
                extra,
            }),
            call,
        }
    }

    pub fn version(&self) -> ExtrinsicVersion {
        match self.signature {
            Some(_) => ExtrinsicVersion::Signed,
            None => ExtrinsicVersion::Unsigned,
        }
    }

    pub fn nonce(&self) -> Option<u32> {
        self.signature.as_ref().map(|s| s.extra.nonce)
    }

    pub fn app_id(&self) -> Option<AppId> {
        self.signature.as_ref().map(|s| AppId(s.extra.app_id))
    }

    pub fn signer(&self) -> Option<&AccountId> {
        match self.signature.as_ref()?.address {
            MultiAddress::Id(ref account) => Some(account),
            _ => None,
        }
    }

    /// Full wire encoding, length prefix included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut inner = Vec::new();
        inner.push(self.version().into());
        if let Some(sig) = &self.signature {
            sig.address.encode_to(&mut inner);
            sig.signature.encode_to(&mut inner);
            sig.extra.encode_to(&mut inner);
        }
        self.call.encode_to(&mut inner);

        let mut out = Compact(inner.len() as u32).encode();
        out.extend(inner);
        out
    }

    pub fn hash(&self) -> H256 {
        blake2_256(&self.to_bytes())
    }
}
