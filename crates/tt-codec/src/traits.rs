use tt_core::Result;

use crate::verify::check_roundtrip;

/// A reversible text transform.
pub trait TextCodec: Send + Sync {
    /// Everything needed to reconstruct the input.
    type Encoded;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Encode text. Encoding never fails.
    fn encode(&self, text: &str) -> Self::Encoded;

    /// Reconstruct the original text.
    fn decode(&self, encoded: &Self::Encoded) -> Result<String>;

    /// Encode, then decode and compare against the input before handing the
    /// encoding out. Fails with a round-trip error instead of returning an
    /// encoding that would not reproduce `text`.
    fn encode_verified(&self, text: &str) -> Result<Self::Encoded> {
        let encoded = self.encode(text);
        let recovered = self.decode(&encoded)?;
        check_roundtrip(text, &recovered)?;
        Ok(encoded)
    }
}
