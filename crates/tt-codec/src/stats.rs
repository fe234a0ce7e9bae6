//! Size statistics shared by both codecs. Figures are estimates for
//! reporting only; nothing downstream depends on them for correctness.

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `original / compressed`, or 1.0 when nothing was produced.
pub fn compression_ratio(original: usize, compressed: usize) -> f64 {
    if compressed == 0 {
        return 1.0;
    }
    original as f64 / compressed as f64
}

/// `(1 - compressed / original) * 100`, or 0.0 for empty input.
pub fn percent_saved(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

pub(crate) fn serialize_round_2<S: serde::Serializer>(
    value: &f64,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_to(*value, 2))
}

pub(crate) fn serialize_round_4<S: serde::Serializer>(
    value: &f64,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_to(*value, 4))
}
