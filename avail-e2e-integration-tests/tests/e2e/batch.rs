use std::time::Duration;

use avail_e2e_client::{
    client::{
        runner::RunReport,
        tx_broadcast::{HarnessClientError, WaitFor},
    },
    test::bob,
};
use avail_e2e_lib::block::TransactionStatus;
use futures::future::join_all;

use crate::fixture::harness_fixture::HarnessFixture;

#[tokio::test]
async fn batch_uses_consecutive_nonces() {
    let fixture = HarnessFixture::with_batch(5).await;
    let RunReport::Batch(included) = fixture.run().await.unwrap() else {
        panic!("expected a batch run");
    };

    let nonces: Vec<u32> = included.iter().map(|tx| tx.nonce).collect();
    assert_eq!(nonces, vec![0, 1, 2, 3, 4]);
    let submitted: Vec<Option<u32>> = fixture
        .node()
        .submitted()
        .iter()
        .map(|tx| tx.nonce())
        .collect();
    assert_eq!(submitted, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    // the nonce is fetched once, then incremented locally
    assert_eq!(fixture.node().next_index_calls(), 1);
}

#[tokio::test]
async fn batch_starts_at_node_nonce() {
    let fixture = HarnessFixture::with_batch(3).await;
    fixture
        .node()
        .set_nonce(*fixture.client().signer_account(), 41);
    let RunReport::Batch(included) = fixture.run().await.unwrap() else {
        panic!("expected a batch run");
    };
    assert_eq!(
        included.iter().map(|tx| tx.nonce).collect::<Vec<_>>(),
        vec![41, 42, 43]
    );
}

#[tokio::test]
async fn batch_does_not_wait_for_inclusion() {
    let fixture = HarnessFixture::with_batch(3).await;
    fixture.node().pause_inclusion();

    let pending = tokio::time::timeout(
        Duration::from_secs(1),
        fixture
            .client()
            .submit_batch(3, 0, |i| format!("tx {i}").into_bytes()),
    )
    .await
    .expect("submission must not wait for inclusion")
    .unwrap();
    assert_eq!(pending.len(), 3);
    assert_eq!(fixture.node().submitted().len(), 3);

    fixture.node().resume_inclusion();
    let included = join_all(pending.into_iter().map(|tx| tx.wait_for(WaitFor::InBlock))).await;
    assert!(included.iter().all(Result::is_ok));
}

#[tokio::test]
async fn stalled_inclusion_times_out() {
    let fixture = HarnessFixture::with_batch(2).await;
    fixture.node().pause_inclusion();

    let pending = fixture
        .client()
        .submit_batch(2, 0, |_| b"stuck".to_vec())
        .await
        .unwrap();
    for tx in pending {
        let err = tx
            .wait_for_with_timeout(WaitFor::InBlock, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessClientError::Timeout { .. }));
    }
}

#[tokio::test]
async fn batch_reports_first_failure_after_all_settle() {
    let fixture = HarnessFixture::with_batch(3).await;
    fixture.node().fail_next_with(TransactionStatus::Dropped);

    let err = fixture.run().await.unwrap_err();
    assert!(err == TransactionStatus::Dropped);
    // the failure does not stop the rest of the batch from being sent
    assert_eq!(fixture.node().submitted().len(), 3);
    assert_eq!(fixture.node().best_block().0, 2);
}

#[tokio::test]
async fn stale_nonce_is_rejected_by_the_node() {
    let fixture = HarnessFixture::with_batch(2).await;
    fixture
        .node()
        .set_nonce(*fixture.client().signer_account(), 1);

    let err = fixture
        .client()
        .submit_batch(2, 0, |_| b"stale".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessClientError::Rpc(_)));
    assert!(fixture.node().submitted().is_empty());
}

#[tokio::test]
async fn signers_keep_separate_nonces() {
    let fixture = HarnessFixture::with_batch(2).await;
    let bob_client = fixture.client().with_signer(bob());

    let alice_txs = fixture
        .client()
        .submit_batch(2, 0, |_| b"alice".to_vec())
        .await
        .unwrap();
    let bob_nonce = bob_client.next_nonce().await.unwrap();
    let bob_txs = bob_client
        .submit_batch(2, bob_nonce, |_| b"bob".to_vec())
        .await
        .unwrap();

    assert_eq!(bob_nonce, 0);
    assert_eq!(
        alice_txs.iter().map(|tx| tx.nonce).collect::<Vec<_>>(),
        bob_txs.iter().map(|tx| tx.nonce).collect::<Vec<_>>()
    );
    assert_ne!(alice_txs[0].tx_hash, bob_txs[0].tx_hash);
}
