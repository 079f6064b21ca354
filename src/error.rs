use thiserror::Error;

/// The crate `Error` type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid method name: {0:?}")]
    InvalidMethodName(String),

    #[error("Unallowed method: {0}")]
    UnallowedMethod(String),

    #[error("Invalid response: expected id {expected}, received {received:?}")]
    CorrelationMismatch {
        expected: u64,
        received: Option<serde_json::Value>,
    },

    #[error("API Error: Method {0} not found.")]
    MethodNotFound(String),

    #[error("JsonRpcError {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to deserialize into JSON: {text}")]
    Deserialization {
        source: serde_json::Error,
        text: String,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("No transaction found for {0}")]
    RecordNotFound(String),

    #[error("Malformed transaction record: {0}")]
    MalformedRecord(String),

    #[error("Unsupported balance layout: {0}")]
    UnsupportedBalanceLayout(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// The crate `Result` type.
pub type Result<T> = core::result::Result<T, Error>;
