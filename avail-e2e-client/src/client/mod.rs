pub mod block_scan;
pub mod client_with_signer;
pub mod runner;
pub mod tx_broadcast;
pub mod tx_builder;
