#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrimitiveError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid base58 encoding")]
    InvalidBase58,
    #[error("unsupported ss58 prefix byte {0}")]
    UnsupportedSs58Prefix(u8),
    #[error("ss58 checksum mismatch")]
    Ss58Checksum,
    #[error("invalid cell {0:?}, expected `row:col`")]
    InvalidCell(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtrinsicError {
    #[error("codec error: {0}")]
    Codec(#[from] parity_scale_codec::Error),
    #[error("length prefix says {declared} bytes but {actual} follow")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("unsupported extrinsic version {0}")]
    UnsupportedVersion(u8),
    #[error("call is truncated")]
    TruncatedCall,
    #[error("{0} trailing bytes after call arguments")]
    TrailingBytes(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
