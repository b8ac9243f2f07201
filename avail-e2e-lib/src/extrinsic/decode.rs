use parity_scale_codec::{Compact, Decode};

use crate::{error::ExtrinsicError, primitives::decode_prefixed_hex};

use super::{
    CallIndex, ExtrinsicSignature, ExtrinsicVersion, MultiAddress, MultiSignature, RawCall,
    SignedExtra, UncheckedExtrinsic,
};

impl UncheckedExtrinsic {
    /// Decodes a length-prefixed extrinsic, as found in a block body.
    pub fn decode(bytes: &[u8]) -> Result<Self, ExtrinsicError> {
        let mut input = bytes;
        let declared = Compact::<u32>::decode(&mut input)?.0 as usize;
        if declared != input.len() {
            return Err(ExtrinsicError::LengthMismatch {
                declared,
                actual: input.len(),
            });
        }

        let version = input.first().copied().ok_or(ExtrinsicError::TruncatedCall)?;
        input = &input[1..];
        let version = ExtrinsicVersion::try_from(version)
            .map_err(|_| ExtrinsicError::UnsupportedVersion(version))?;

        let signature = match version {
            ExtrinsicVersion::Unsigned => None,
            ExtrinsicVersion::Signed => Some(ExtrinsicSignature {
                address: MultiAddress::decode(&mut input)?,
                signature: MultiSignature::decode(&mut input)?,
                extra: SignedExtra::decode(&mut input)?,
            }),
        };

        let [pallet, call, args @ ..] = input else {
            return Err(ExtrinsicError::TruncatedCall);
        };
        Ok(UncheckedExtrinsic {
            signature,
            call: RawCall {
                index: CallIndex {
                    pallet: *pallet,
                    call: *call,
                },
                args: args.to_vec(),
            },
        })
    }

    pub fn decode_hex(hex: &str) -> Result<Self, ExtrinsicError> {
        Self::decode(&decode_prefixed_hex(hex)?)
    }
}
