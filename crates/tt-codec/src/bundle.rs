//! Multi-file lossless bundle, the persisted JSON shape.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tt_core::{Result, TrimError};

use crate::lossless::{decode_body, lossless_decode, DecodeTable, LosslessFile};

const GENERATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Schema marker plus generation time plus the encoded files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosslessBundle {
    pub tokentrim_lossless_v1: bool,
    pub generated: String,
    #[serde(default)]
    pub files: Vec<LosslessFile>,
}

impl LosslessBundle {
    pub fn new() -> Self {
        Self {
            tokentrim_lossless_v1: true,
            generated: Utc::now().format(GENERATED_FORMAT).to_string(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: LosslessFile) {
        self.files.push(file);
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse a bundle; the schema marker must be `true`.
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: Self = serde_json::from_str(json)?;
        if !bundle.tokentrim_lossless_v1 {
            return Err(TrimError::InvalidBundle(
                "tokentrim_lossless_v1 marker is not set".to_string(),
            ));
        }
        Ok(bundle)
    }

    /// Decode every file, in bundle order.
    pub fn decode_all(&self) -> Result<Vec<String>> {
        self.files.iter().map(lossless_decode).collect()
    }
}

impl Default for LosslessBundle {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct EncodedParts {
    body: String,
    decode_table: DecodeTable,
}

/// Decode any JSON object carrying `body` and `decode_table`; other fields
/// are ignored.
pub fn decode_value(value: &serde_json::Value) -> Result<String> {
    let parts = EncodedParts::deserialize(value)?;
    decode_body(&parts.body, &parts.decode_table)
}
