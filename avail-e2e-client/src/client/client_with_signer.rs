use avail_e2e_lib::primitives::{AccountId, AppId};
use subxt_signer::sr25519::Keypair;

use crate::{
    client::{
        tx_broadcast::{AvailTxBroadcast, HarnessClientError, PendingTx},
        tx_builder::{account_id, AvailTransactionBuilder, ChainContext},
    },
    rpc_ext::AvailRpc,
};

pub struct AvailClientWithSigner<R: AvailRpc> {
    rpc: R,
    context: ChainContext,
    signer: Keypair,
    signer_account: AccountId,
    app_id: AppId,
}

impl<R: AvailRpc> AvailClientWithSigner<R> {
    pub async fn connect(
        rpc: R,
        signer: Keypair,
        app_id: AppId,
    ) -> Result<Self, HarnessClientError> {
        let context = ChainContext::fetch(&rpc).await?;
        Ok(Self::new(rpc, context, signer, app_id))
    }

    pub fn new(rpc: R, context: ChainContext, signer: Keypair, app_id: AppId) -> Self {
        Self {
            rpc,
            context,
            signer_account: account_id(&signer),
            signer,
            app_id,
        }
    }

    pub fn with_signer(&self, signer: Keypair) -> AvailClientWithSigner<&R> {
        AvailClientWithSigner {
            rpc: &self.rpc,
            context: self.context.clone(),
            signer_account: account_id(&signer),
            signer,
            app_id: self.app_id,
        }
    }

    pub fn rpc_client(&self) -> &R {
        &self.rpc
    }

    pub fn context(&self) -> &ChainContext {
        &self.context
    }

    pub fn signer_account(&self) -> &AccountId {
        &self.signer_account
    }

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    pub fn tx_builder(&self) -> AvailTransactionBuilder<'_> {
        AvailTransactionBuilder {
            context: &self.context,
            signer: &self.signer,
            app_id: self.app_id,
        }
    }

    pub fn tx_broadcast(&self) -> AvailTxBroadcast<'_, R> {
        AvailTxBroadcast { rpc: &self.rpc }
    }

    pub async fn next_nonce(&self) -> Result<u32, HarnessClientError> {
        let nonce = self.rpc.account_next_index(&self.signer_account).await?;
        tracing::info!("Next nonce of {} is {}", self.signer_account, nonce);
        Ok(nonce)
    }

    /// Signs and submits one `submit_data` transaction without waiting for
    /// it to be included.
    pub async fn submit_data(
        &self,
        data: &[u8],
        nonce: u32,
    ) -> Result<PendingTx, HarnessClientError> {
        let tx = self.tx_builder().submit_data(data, nonce);
        self.tx_broadcast().broadcast_transaction(&tx).await
    }

    /// Fires `batch` transactions with consecutive nonces starting at
    /// `first_nonce`. Nothing is awaited between submissions beyond the node
    /// accepting each one; a batch of 0 still sends one transaction.
    #[tracing::instrument(skip_all, fields(batch = batch, first_nonce = first_nonce))]
    pub async fn submit_batch(
        &self,
        batch: u32,
        first_nonce: u32,
        mut payload: impl FnMut(u32) -> Vec<u8>,
    ) -> Result<Vec<PendingTx>, HarnessClientError> {
        let batch = batch.max(1);
        let mut nonce = first_nonce;
        let mut pending = Vec::with_capacity(batch as usize);
        for i in 0..batch {
            let data = payload(i);
            pending.push(self.submit_data(&data, nonce).await?);
            if i + 1 < batch {
                nonce = nonce
                    .checked_add(1)
                    .ok_or(HarnessClientError::NonceOverflow(nonce))?;
            }
        }
        tracing::info!("Submitted {} transactions", pending.len());
        Ok(pending)
    }
}
