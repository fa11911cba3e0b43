#[derive(Debug, Error)]
pub enum Error {
    #[error("abi error: {0}")]
    AbiError(#[from] solabi::Error),

    #[error("Invalid Data")]
    InvalidData,

    #[error("Hex Error")]
    HexError(#[from] hex::FromHexError),

    #[error("Json Error")]
    JsonError(#[from] serde_json::Error),
}
