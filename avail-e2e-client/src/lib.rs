pub mod client;
pub mod config;
pub mod rpc_ext;
