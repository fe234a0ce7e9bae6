use serde::{Deserialize, Serialize};

use crate::error::{Result, TrimError};

/// Number of distinct placeholder indices a four-digit decode table can hold.
pub const INDEX_SPACE: usize = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub lossless: LosslessConfig,
}

impl TrimConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.lossless.validate()
    }
}

/// Tunables for the pattern-substitution codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LosslessConfig {
    /// Shortest window, in characters, worth considering as a pattern.
    pub min_pattern_len: usize,
    /// A pattern must occur at least this often to be substituted.
    pub min_occurrences: usize,
    /// Cap on ranked candidates, and therefore on decode-table indices.
    pub max_patterns: usize,
    /// Largest window, in lines, scanned for candidates.
    pub max_window_lines: usize,
}

impl LosslessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_patterns > INDEX_SPACE {
            return Err(TrimError::InvalidConfig(format!(
                "max_patterns {} exceeds index space {}",
                self.max_patterns, INDEX_SPACE
            )));
        }
        if self.min_occurrences == 0 {
            return Err(TrimError::InvalidConfig("min_occurrences must be at least 1".into()));
        }
        if self.max_window_lines == 0 {
            return Err(TrimError::InvalidConfig("max_window_lines must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for LosslessConfig {
    fn default() -> Self {
        Self {
            min_pattern_len: 20,
            min_occurrences: 2,
            max_patterns: 9999,
            max_window_lines: 3,
        }
    }
}
