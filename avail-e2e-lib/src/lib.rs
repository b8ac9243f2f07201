pub mod block;
pub mod call;
pub mod error;
pub mod extrinsic;
pub mod kate;
pub mod payload;
pub mod primitives;
