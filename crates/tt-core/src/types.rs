use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "unknown";

/// Descriptive metadata carried through the codecs untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filename: String,
    pub language: String,
}

impl FileMeta {
    pub fn new(filename: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            language: language.into(),
        }
    }

    pub fn named(filename: impl Into<String>) -> Self {
        Self::new(filename, UNKNOWN)
    }
}

impl Default for FileMeta {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }
}
