use std::time::Duration;

use anyhow::Context;
use avail_e2e_lib::{
    block::{RuntimeVersion, SignedBlock, TransactionStatus},
    call::CallRegistry,
    error::PrimitiveError,
    extrinsic::CallIndex,
    kate::{BlockLength, Cell, DataProof},
    primitives::{decode_prefixed_hex, encode_prefixed_hex, AccountId, H256, DEFAULT_SS58_PREFIX},
};
use futures::{stream::BoxStream, StreamExt};
use jsonrpsee::{
    core::client::{ClientT, Subscription, SubscriptionClientT},
    rpc_params,
    ws_client::{WsClient, WsClientBuilder},
};
use parity_scale_codec::Decode;

use crate::client::tx_broadcast::HarnessClientError;

pub type TxStatusStream = BoxStream<'static, Result<TransactionStatus, HarnessClientError>>;

/// Everything the harness needs from an Avail node.
#[async_trait::async_trait]
pub trait AvailRpc: Send + Sync {
    /// Next usable nonce of `account`, transactions in the pool included.
    async fn account_next_index(&self, account: &AccountId) -> Result<u32, HarnessClientError>;
    async fn runtime_version(&self) -> Result<RuntimeVersion, HarnessClientError>;
    async fn genesis_hash(&self) -> Result<H256, HarnessClientError>;
    async fn call_registry(&self) -> Result<CallRegistry, HarnessClientError>;
    /// Submits a length prefixed extrinsic and subscribes to its pool status.
    async fn submit_and_watch(
        &self,
        extrinsic: &[u8],
    ) -> Result<TxStatusStream, HarnessClientError>;
    async fn get_block(&self, hash: &H256) -> Result<Option<SignedBlock>, HarnessClientError>;
    async fn block_length(&self, at: Option<H256>) -> Result<BlockLength, HarnessClientError>;
    async fn query_proof(
        &self,
        cells: Vec<Cell>,
        at: Option<H256>,
    ) -> Result<Vec<u8>, HarnessClientError>;
    async fn query_data_proof(
        &self,
        data_index: u32,
        at: Option<H256>,
    ) -> Result<DataProof, HarnessClientError>;
}

pub async fn connect_ws(
    url: &str,
    request_timeout: Duration,
) -> Result<WsClient, HarnessClientError> {
    tracing::info!("Connecting to {}", url);
    Ok(WsClientBuilder::default()
        .request_timeout(request_timeout)
        .build(url)
        .await?)
}

#[async_trait::async_trait]
impl AvailRpc for WsClient {
    async fn account_next_index(&self, account: &AccountId) -> Result<u32, HarnessClientError> {
        Ok(self
            .request(
                "system_accountNextIndex",
                rpc_params![account.to_ss58(DEFAULT_SS58_PREFIX)],
            )
            .await?)
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion, HarnessClientError> {
        Ok(self.request("state_getRuntimeVersion", rpc_params![]).await?)
    }

    async fn genesis_hash(&self) -> Result<H256, HarnessClientError> {
        let hash: Option<H256> = self.request("chain_getBlockHash", rpc_params![0u32]).await?;
        Ok(hash.context("node returned no genesis hash")?)
    }

    async fn call_registry(&self) -> Result<CallRegistry, HarnessClientError> {
        let raw: String = self.request("state_getMetadata", rpc_params![]).await?;
        let bytes = decode_prefixed_hex(&raw).map_err(PrimitiveError::from)?;
        let metadata = subxt_metadata::Metadata::decode(&mut bytes.as_slice())
            .context("failed to decode runtime metadata")?;
        let registry: CallRegistry = metadata
            .pallets()
            .flat_map(|pallet| {
                let pallet_index = pallet.index();
                let pallet_name = pallet.name().to_string();
                pallet
                    .call_variants()
                    .unwrap_or_default()
                    .iter()
                    .map(|variant| {
                        (
                            CallIndex {
                                pallet: pallet_index,
                                call: variant.index,
                            },
                            pallet_name.clone(),
                            variant.name.clone(),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        tracing::debug!("Loaded {} calls from runtime metadata", registry.len());
        Ok(registry)
    }

    async fn submit_and_watch(
        &self,
        extrinsic: &[u8],
    ) -> Result<TxStatusStream, HarnessClientError> {
        let subscription: Subscription<TransactionStatus> = self
            .subscribe(
                "author_submitAndWatchExtrinsic",
                rpc_params![encode_prefixed_hex(extrinsic)],
                "author_unwatchExtrinsic",
            )
            .await?;
        Ok(subscription
            .map(|status| status.map_err(HarnessClientError::from))
            .boxed())
    }

    async fn get_block(&self, hash: &H256) -> Result<Option<SignedBlock>, HarnessClientError> {
        Ok(self.request("chain_getBlock", rpc_params![hash]).await?)
    }

    async fn block_length(&self, at: Option<H256>) -> Result<BlockLength, HarnessClientError> {
        Ok(self.request("kate_blockLength", rpc_params![at]).await?)
    }

    async fn query_proof(
        &self,
        cells: Vec<Cell>,
        at: Option<H256>,
    ) -> Result<Vec<u8>, HarnessClientError> {
        Ok(self.request("kate_queryProof", rpc_params![cells, at]).await?)
    }

    async fn query_data_proof(
        &self,
        data_index: u32,
        at: Option<H256>,
    ) -> Result<DataProof, HarnessClientError> {
        Ok(self
            .request("kate_queryDataProof", rpc_params![data_index, at])
            .await?)
    }
}

#[async_trait::async_trait]
impl<R: AvailRpc> AvailRpc for &R {
    async fn account_next_index(&self, account: &AccountId) -> Result<u32, HarnessClientError> {
        (**self).account_next_index(account).await
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion, HarnessClientError> {
        (**self).runtime_version().await
    }

    async fn genesis_hash(&self) -> Result<H256, HarnessClientError> {
        (**self).genesis_hash().await
    }

    async fn call_registry(&self) -> Result<CallRegistry, HarnessClientError> {
        (**self).call_registry().await
    }

    async fn submit_and_watch(
        &self,
        extrinsic: &[u8],
    ) -> Result<TxStatusStream, HarnessClientError> {
        (**self).submit_and_watch(extrinsic).await
    }

    async fn get_block(&self, hash: &H256) -> Result<Option<SignedBlock>, HarnessClientError> {
        (**self).get_block(hash).await
    }

    async fn block_length(&self, at: Option<H256>) -> Result<BlockLength, HarnessClientError> {
        (**self).block_length(at).await
    }

    async fn query_proof(
        &self,
        cells: Vec<Cell>,
        at: Option<H256>,
    ) -> Result<Vec<u8>, HarnessClientError> {
        (**self).query_proof(cells, at).await
    }

    async fn query_data_proof(
        &self,
        data_index: u32,
        at: Option<H256>,
    ) -> Result<DataProof, HarnessClientError> {
        (**self).query_data_proof(data_index, at).await
    }
}
