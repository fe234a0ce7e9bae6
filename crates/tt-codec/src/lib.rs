//! TokenTrim codecs: lossless text size reduction with exact reconstruction.
//!
//! Two independent codecs:
//! - Huffman: character-level prefix coding to a `'0'`/`'1'` bit string.
//! - Lossless substitution: repeated multi-line blocks replaced by
//!   fixed-width placeholders plus a decode table.
//!
//! For every input `T`, `decode(encode(T)) == T` holds for both.

pub mod bundle;
pub mod huffman;
pub mod lossless;
pub mod patterns;
pub mod stats;
pub mod traits;
pub mod verify;

pub use bundle::{decode_value, LosslessBundle};
pub use huffman::{huffman_decode, huffman_encode, CodeTable, HuffmanCoder, HuffmanResult};
pub use lossless::{
    decode_body, lossless_decode, lossless_encode, DecodeTable, LosslessFile, SubstitutionCodec,
};
pub use patterns::{PatternCandidate, PatternCatalog};
pub use traits::TextCodec;
pub use verify::{check_roundtrip, verify_roundtrip};
