//! Lossless pattern-substitution codec.
//!
//! Encode:
//! 1. Escape literal control characters: STX -> `STX e STX`, ETX -> `STX x STX`.
//!    After this the body contains no ETX at all, so the only ETX characters
//!    ever present are the ends of real placeholders.
//! 2. Ask the [`PatternCatalog`] for candidates, longest first.
//! 3. For each candidate still occurring often enough in the evolving body,
//!    record `index -> pattern` and replace every occurrence with
//!    `STX dddd ETX`.
//!
//! Decode replays the table in descending index order, then unescapes in a
//! single left-to-right scan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use tt_core::config::INDEX_SPACE;
use tt_core::{FileMeta, LosslessConfig, Result, TrimConfig, TrimError};

use crate::patterns::PatternCatalog;
use crate::stats::{compression_ratio, percent_saved, serialize_round_2, serialize_round_4};
use crate::traits::TextCodec;

/// Start-of-placeholder control character.
pub const STX: char = '\u{2}';
/// End-of-placeholder control character.
pub const ETX: char = '\u{3}';
/// Decimal digits in a placeholder index.
pub const INDEX_DIGITS: usize = 4;
/// STX + digits + ETX.
pub const PLACEHOLDER_LEN: usize = 1 + INDEX_DIGITS + 1;

const ESCAPED_STX: &str = "\u{2}e\u{2}";
const ESCAPED_ETX: &str = "\u{2}x\u{2}";

/// Zero-padded index -> original pattern text.
pub type DecodeTable = BTreeMap<String, String>;

/// Lossless-encoded representation of a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosslessFile {
    pub filename: String,
    pub language: String,
    /// UTF-8 bytes of the input.
    pub original_size: usize,
    /// UTF-8 bytes of `body`.
    pub encoded_size: usize,
    pub patterns_count: usize,
    #[serde(serialize_with = "serialize_round_4")]
    pub compression_ratio: f64,
    #[serde(serialize_with = "serialize_round_2")]
    pub space_saved_pct: f64,
    pub decode_table: DecodeTable,
    pub body: String,
}

impl LosslessFile {
    pub fn meta(&self) -> FileMeta {
        FileMeta::new(self.filename.clone(), self.language.clone())
    }
}

pub fn placeholder(index: usize) -> String {
    format!("{}{:0width$}{}", STX, index, ETX, width = INDEX_DIGITS)
}

pub fn table_key(index: usize) -> String {
    format!("{:0width$}", index, width = INDEX_DIGITS)
}

fn parse_key(key: &str) -> Result<usize> {
    if key.len() != INDEX_DIGITS || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrimError::InvalidTableKey(key.to_string()));
    }
    key.parse()
        .map_err(|_| TrimError::InvalidTableKey(key.to_string()))
}

/// Replace literal control characters with their escape sequences.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            STX => out.push_str(ESCAPED_STX),
            ETX => out.push_str(ESCAPED_ETX),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape`]. A bare ETX is passed through; any STX must start
/// an escape sequence.
pub fn unescape(body: &str) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch != STX {
            out.push(ch);
            continue;
        }
        match (chars.next(), chars.next()) {
            (Some((_, 'e')), Some((_, STX))) => out.push(STX),
            (Some((_, 'x')), Some((_, STX))) => out.push(ETX),
            (Some((_, d)), _) if d.is_ascii_digit() => {
                return Err(TrimError::UnresolvedPlaceholder {
                    offset,
                    index: body[offset + 1..].chars().take(INDEX_DIGITS).collect(),
                });
            }
            _ => return Err(TrimError::MalformedEscape { offset }),
        }
    }
    Ok(out)
}

/// Greedy pattern-substitution codec.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionCodec {
    catalog: PatternCatalog,
}

impl SubstitutionCodec {
    pub fn new(config: LosslessConfig) -> Self {
        Self { catalog: PatternCatalog::new(config) }
    }

    pub fn from_config(config: &TrimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.lossless.clone()))
    }

    pub fn config(&self) -> &LosslessConfig {
        self.catalog.config()
    }

    /// Encode `text`, carrying `meta` through to the result.
    pub fn encode_file(&self, text: &str, meta: FileMeta) -> LosslessFile {
        let config = self.config();
        let index_limit = config.max_patterns.min(INDEX_SPACE);
        let min_occurrences = config.min_occurrences.max(1);

        let escaped = escape(text);
        let candidates = self.catalog.find_candidates(&escaped);

        let mut body = escaped.clone();
        let mut decode_table = DecodeTable::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if index >= index_limit {
                warn!(dropped = candidates.len() - index, "decode table index space exhausted");
                break;
            }
            if candidate.len <= PLACEHOLDER_LEN {
                continue;
            }
            let remaining = body.matches(candidate.text).count();
            if remaining < min_occurrences {
                trace!(index, remaining, "pattern consumed by earlier substitutions");
                continue;
            }
            decode_table.insert(table_key(index), candidate.text.to_string());
            body = body.replace(candidate.text, &placeholder(index));
        }

        let original_size = text.len();
        let encoded_size = body.len();
        debug!(
            filename = %meta.filename,
            original_size,
            encoded_size,
            patterns = decode_table.len(),
            "lossless encode"
        );

        LosslessFile {
            filename: meta.filename,
            language: meta.language,
            original_size,
            encoded_size,
            patterns_count: decode_table.len(),
            compression_ratio: compression_ratio(original_size, encoded_size),
            space_saved_pct: percent_saved(original_size, encoded_size).max(0.0),
            decode_table,
            body,
        }
    }
}

impl TextCodec for SubstitutionCodec {
    type Encoded = LosslessFile;

    fn name(&self) -> &'static str {
        "lossless"
    }

    fn encode(&self, text: &str) -> LosslessFile {
        self.encode_file(text, FileMeta::default())
    }

    fn decode(&self, encoded: &LosslessFile) -> Result<String> {
        decode_body(&encoded.body, &encoded.decode_table)
    }
}

/// Encode with the default configuration.
pub fn lossless_encode(text: &str, meta: FileMeta) -> LosslessFile {
    SubstitutionCodec::default().encode_file(text, meta)
}

/// Reconstruct the exact original text of `encoded`.
pub fn lossless_decode(encoded: &LosslessFile) -> Result<String> {
    decode_body(&encoded.body, &encoded.decode_table)
}

/// Replay `decode_table` over `body` highest index first, then unescape.
///
/// Substitutions ran in ascending index order, each on the output of the
/// previous one; undoing them in reverse restores every intermediate body
/// exactly.
pub fn decode_body(body: &str, decode_table: &DecodeTable) -> Result<String> {
    let mut entries = decode_table
        .iter()
        .map(|(key, pattern)| parse_key(key).map(|index| (index, pattern)))
        .collect::<Result<Vec<_>>>()?;
    entries.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    let mut restored = body.to_string();
    for (index, pattern) in entries {
        restored = restored.replace(&placeholder(index), pattern);
    }
    unescape(&restored)
}
