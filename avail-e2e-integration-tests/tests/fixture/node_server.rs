use std::net::SocketAddr;

use avail_e2e_client::{
    client::tx_broadcast::HarnessClientError,
    rpc_ext::AvailRpc,
    test::{MockAvailNode, MOCK_GENESIS},
};
use avail_e2e_lib::{
    block::{RuntimeVersion, SignedBlock},
    kate::{BlockLength, Cell, DataProof},
    primitives::{decode_prefixed_hex, encode_prefixed_hex, AccountId, H256},
};
use futures::StreamExt;
use jsonrpsee::{
    core::{ClientError, RpcResult, SubscriptionResult},
    proc_macros::rpc,
    server::{Server, ServerHandle},
    types::{error::INTERNAL_ERROR_CODE, ErrorObject, ErrorObjectOwned},
    PendingSubscriptionSink, SubscriptionMessage,
};

use crate::fixture::metadata::runtime_metadata;

/// The slice of the Substrate and Kate RPC surface the harness talks to.
#[rpc(server)]
pub trait AvailNodeApi {
    #[method(name = "system_accountNextIndex")]
    async fn account_next_index(&self, address: String) -> RpcResult<u32>;

    #[method(name = "state_getMetadata")]
    async fn metadata(&self) -> RpcResult<String>;

    #[method(name = "state_getRuntimeVersion")]
    async fn runtime_version(&self) -> RpcResult<RuntimeVersion>;

    #[method(name = "chain_getBlockHash")]
    async fn block_hash(&self, number: u32) -> RpcResult<Option<H256>>;

    #[method(name = "chain_getBlock")]
    async fn block(&self, hash: H256) -> RpcResult<Option<SignedBlock>>;

    #[method(name = "kate_blockLength")]
    async fn block_length(&self, at: Option<H256>) -> RpcResult<BlockLength>;

    #[method(name = "kate_queryProof")]
    async fn query_proof(&self, cells: Vec<Cell>, at: Option<H256>) -> RpcResult<Vec<u8>>;

    #[method(name = "kate_queryDataProof")]
    async fn query_data_proof(&self, data_index: u32, at: Option<H256>) -> RpcResult<DataProof>;

    #[subscription(
        name = "author_submitAndWatchExtrinsic" => "author_extrinsicUpdate",
        unsubscribe = "author_unwatchExtrinsic",
        item = avail_e2e_lib::block::TransactionStatus
    )]
    async fn submit_and_watch(&self, extrinsic: String) -> SubscriptionResult;
}

fn node_error(err: HarnessClientError) -> ErrorObjectOwned {
    match err {
        HarnessClientError::Rpc(ClientError::Call(err)) => err,
        other => ErrorObject::owned(INTERNAL_ERROR_CODE, other.to_string(), None::<()>),
    }
}

/// Serves a [`MockAvailNode`] over websocket JSON-RPC.
pub struct MockNodeServer {
    node: MockAvailNode,
    metadata: String,
}

#[jsonrpsee::core::async_trait]
impl AvailNodeApiServer for MockNodeServer {
    async fn account_next_index(&self, address: String) -> RpcResult<u32> {
        let (account, _) = AccountId::from_ss58(&address)
            .map_err(|e| ErrorObject::owned(INTERNAL_ERROR_CODE, e.to_string(), None::<()>))?;
        self.node.account_next_index(&account).await.map_err(node_error)
    }

    async fn metadata(&self) -> RpcResult<String> {
        Ok(self.metadata.clone())
    }

    async fn runtime_version(&self) -> RpcResult<RuntimeVersion> {
        self.node.runtime_version().await.map_err(node_error)
    }

    async fn block_hash(&self, number: u32) -> RpcResult<Option<H256>> {
        Ok((number == 0).then_some(MOCK_GENESIS))
    }

    async fn block(&self, hash: H256) -> RpcResult<Option<SignedBlock>> {
        self.node.get_block(&hash).await.map_err(node_error)
    }

    async fn block_length(&self, at: Option<H256>) -> RpcResult<BlockLength> {
        self.node.block_length(at).await.map_err(node_error)
    }

    async fn query_proof(&self, cells: Vec<Cell>, at: Option<H256>) -> RpcResult<Vec<u8>> {
        self.node.query_proof(cells, at).await.map_err(node_error)
    }

    async fn query_data_proof(&self, data_index: u32, at: Option<H256>) -> RpcResult<DataProof> {
        self.node
            .query_data_proof(data_index, at)
            .await
            .map_err(node_error)
    }

    async fn submit_and_watch(
        &self,
        pending: PendingSubscriptionSink,
        extrinsic: String,
    ) -> SubscriptionResult {
        let bytes = decode_prefixed_hex(&extrinsic)?;
        let mut statuses = match self.node.submit_and_watch(&bytes).await {
            Ok(statuses) => statuses,
            Err(err) => {
                pending.reject(node_error(err)).await;
                return Ok(());
            }
        };
        let sink = pending.accept().await?;
        while let Some(status) = statuses.next().await {
            let status = status?;
            sink.send(SubscriptionMessage::from_json(&status)?).await?;
        }
        Ok(())
    }
}

pub struct NodeServerFixture {
    pub node: MockAvailNode,
    pub addr: SocketAddr,
    _handle: ServerHandle,
}

impl NodeServerFixture {
    pub async fn start() -> Self {
        let node = MockAvailNode::new();
        let server = Server::builder().build("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.start(
            MockNodeServer {
                node: node.clone(),
                metadata: encode_prefixed_hex(&runtime_metadata()),
            }
            .into_rpc(),
        );
        NodeServerFixture {
            node,
            addr,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }
}

