use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrimError {
    #[error("Unknown code at bit {offset}: no table entry matches {pending:?}")]
    UnknownCode { offset: usize, pending: String },
    #[error("Invalid bit {found:?} at offset {offset}")]
    InvalidBit { offset: usize, found: char },
    #[error("Invalid decode table key: {0:?}")]
    InvalidTableKey(String),
    #[error("Unresolved placeholder {index:?} at byte {offset}")]
    UnresolvedPlaceholder { offset: usize, index: String },
    #[error("Malformed escape sequence at byte {offset}")]
    MalformedEscape { offset: usize },
    #[error("Round-trip mismatch at char {offset}: expected {expected:?}, got {actual:?}")]
    RoundtripMismatch {
        offset: usize,
        expected: String,
        actual: String,
    },
    #[error("Round-trip length mismatch: original={original}, recovered={recovered}")]
    RoundtripLength { original: usize, recovered: usize },
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrimError>;
