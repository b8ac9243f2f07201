use avail_e2e_lib::{
    block::RuntimeVersion,
    call::CallRegistry,
    extrinsic::{
        AdditionalSigned, CallIndex, RawCall, SignedExtra, SignerPayload, UncheckedExtrinsic,
    },
    primitives::{AccountId, AppId, H256},
};
use subxt_signer::sr25519::Keypair;

use crate::{client::tx_broadcast::HarnessClientError, rpc_ext::AvailRpc};

/// Chain parameters every signature commits to. Fetched once per session.
#[derive(Debug, Clone)]
pub struct ChainContext {
    pub runtime_version: RuntimeVersion,
    pub genesis_hash: H256,
    pub registry: CallRegistry,
    pub submit_data: CallIndex,
}

impl ChainContext {
    pub async fn fetch<R: AvailRpc>(rpc: &R) -> Result<Self, HarnessClientError> {
        let (runtime_version, genesis_hash, registry) =
            tokio::try_join!(rpc.runtime_version(), rpc.genesis_hash(), rpc.call_registry())?;
        let submit_data = registry
            .submit_data_index()
            .ok_or(HarnessClientError::MissingCall("DataAvailability.submit_data"))?;
        tracing::info!(
            "Connected to {} spec {} (tx version {}), genesis {}",
            runtime_version.spec_name,
            runtime_version.spec_version,
            runtime_version.transaction_version,
            genesis_hash
        );
        Ok(ChainContext {
            runtime_version,
            genesis_hash,
            registry,
            submit_data,
        })
    }

    pub fn additional_signed(&self) -> AdditionalSigned {
        AdditionalSigned::immortal(
            self.runtime_version.spec_version,
            self.runtime_version.transaction_version,
            self.genesis_hash,
        )
    }
}

pub fn account_id(keypair: &Keypair) -> AccountId {
    AccountId(keypair.public_key().0)
}

pub struct AvailTransactionBuilder<'a> {
    pub context: &'a ChainContext,
    pub signer: &'a Keypair,
    pub app_id: AppId,
}

impl<'a> AvailTransactionBuilder<'a> {
    pub fn submit_data(&self, data: &[u8], nonce: u32) -> UncheckedExtrinsic {
        let call = RawCall::submit_data(self.context.submit_data, data);
        self.sign(call, SignedExtra::immortal(nonce, self.app_id))
    }

    pub fn sign(&self, call: RawCall, extra: SignedExtra) -> UncheckedExtrinsic {
        let additional = self.context.additional_signed();
        let payload = SignerPayload {
            call: &call,
            extra: &extra,
            additional: &additional,
        };
        let signature = self.signer.sign(&payload.signing_bytes());
        UncheckedExtrinsic::new_signed(call, account_id(self.signer), signature.0, extra)
    }
}
