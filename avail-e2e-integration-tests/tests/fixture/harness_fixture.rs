use std::time::Duration;

use avail_e2e_client::{
    client::{
        client_with_signer::AvailClientWithSigner,
        runner::{run, RunReport},
        tx_broadcast::HarnessClientError,
    },
    config::HarnessConfig,
    test::MockAvailNode,
};

pub struct HarnessFixture {
    node: MockAvailNode,
    client: AvailClientWithSigner<MockAvailNode>,
    config: HarnessConfig,
}

impl HarnessFixture {
    pub async fn new() -> Self {
        Self::with_config(Self::default_config()).await
    }

    pub fn default_config() -> HarnessConfig {
        HarnessConfig {
            scan_delay: Duration::ZERO,
            dispatch_timeout: Duration::from_secs(5),
            ..HarnessConfig::dev()
        }
    }

    pub async fn with_config(config: HarnessConfig) -> Self {
        let node = MockAvailNode::new();
        let client = node
            .signer_client(config.signer().unwrap(), config.app_id)
            .await;
        HarnessFixture {
            node,
            client,
            config,
        }
    }

    pub async fn with_data(data: &str) -> Self {
        Self::with_config(HarnessConfig {
            data: Some(data.to_string()),
            ..Self::default_config()
        })
        .await
    }

    pub async fn with_batch(batch: u32) -> Self {
        Self::with_config(HarnessConfig {
            batch,
            ..Self::default_config()
        })
        .await
    }

    pub fn node(&self) -> &MockAvailNode {
        &self.node
    }

    pub fn client(&self) -> &AvailClientWithSigner<MockAvailNode> {
        &self.client
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<RunReport, HarnessClientError> {
        run(&self.client, &self.config).await
    }
}
