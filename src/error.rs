use thiserror::Error;

/// Everything that can stop an action before or after it reaches the chain.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Transport or JSON-RPC level failure
    #[error("RPC request failed: {0}")]
    Rpc(#[from] jsonrpsee::core::client::Error),

    /// The node answered, but with an error inside the query result
    #[error("query failed: {0}")]
    Query(String),

    #[error("malformed RPC response: {0}")]
    MalformedResponse(String),

    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("missing configuration value {0}")]
    MissingVar(String),

    #[error("encoding failed: {0}")]
    Encoding(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Accepted by the network, rejected on execution
    #[error("transaction failed: {kind}")]
    TransactionFailed { kind: String },
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported key type '{0}' (only ed25519 is supported)")]
    UnsupportedType(String),

    #[error("invalid base58 payload: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("expected {expected} bytes, got {got}")]
    Length { expected: &'static str, got: usize },

    #[error("key bytes rejected: {0}")]
    Signature(#[from] ed25519_dalek::SignatureError),
}

#[derive(Debug, Error)]
#[error("cannot parse '{input}' as NEAR amount: {reason}")]
pub struct AmountError {
    pub input: String,
    pub reason: &'static str,
}

impl ExecError {
    /// On-chain rejections carry their own kind; everything else is local or transport
    pub fn failure_kind(&self) -> Option<&str> {
        match self {
            ExecError::TransactionFailed { kind } => Some(kind),
            _ => None,
        }
    }
}
