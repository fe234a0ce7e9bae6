//! Round-trip verification.

use tracing::warn;
use tt_core::{FileMeta, Result, TrimError};

use crate::lossless::{lossless_decode, lossless_encode, LosslessFile};

const CONTEXT_CHARS: usize = 20;

/// Compare a recovered text against the original, reporting the first
/// differing character offset or, failing that, the length mismatch.
pub fn check_roundtrip(original: &str, recovered: &str) -> Result<()> {
    if original == recovered {
        return Ok(());
    }

    let diverged = original
        .char_indices()
        .zip(recovered.char_indices())
        .enumerate()
        .find(|(_, ((_, a), (_, b)))| a != b);

    let err = match diverged {
        Some((offset, ((orig_byte, _), (rec_byte, _)))) => TrimError::RoundtripMismatch {
            offset,
            expected: original[orig_byte..].chars().take(CONTEXT_CHARS).collect(),
            actual: recovered[rec_byte..].chars().take(CONTEXT_CHARS).collect(),
        },
        None => TrimError::RoundtripLength {
            original: original.chars().count(),
            recovered: recovered.chars().count(),
        },
    };
    warn!(error = %err, "round-trip check failed");
    Err(err)
}

/// Lossless-encode `text`, decode it again and confirm exact reconstruction.
pub fn verify_roundtrip(text: &str, meta: FileMeta) -> Result<LosslessFile> {
    let encoded = lossless_encode(text, meta);
    let recovered = lossless_decode(&encoded)?;
    check_roundtrip(text, &recovered)?;
    Ok(encoded)
}
