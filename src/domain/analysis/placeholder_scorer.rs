//! Placeholder Scorer - reproducible pseudo-scores for unevaluated pairs.
//!
//! Gives demo data a stable look across renders and reloads. Not a semantic
//! evaluation and not cryptographic.

/// Lowest placeholder score.
pub const PLACEHOLDER_MIN: u8 = 3;
/// Highest placeholder score.
pub const PLACEHOLDER_MAX: u8 = 10;

/// Deterministic score generator.
pub struct PlaceholderScorer;

impl PlaceholderScorer {
    /// Score in `[3, 10]` for an (option title, criterion name) pair.
    ///
    /// # Algorithm
    /// 32-bit rolling hash `h = (h << 5) - h + unit` over the UTF-16 code
    /// units of `option_title + criterion_name`, wrapped to i32, then
    /// `3 + (|h| mod 8)`.
    pub fn score(option_title: &str, criterion_name: &str) -> u8 {
        let units = option_title
            .encode_utf16()
            .chain(criterion_name.encode_utf16());
        Self::bucket(Self::rolling_hash(units))
    }

    /// Same shape as the classic Java/JS `String.hashCode`.
    fn rolling_hash(units: impl Iterator<Item = u16>) -> i32 {
        units.fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(unit as i32)
        })
    }

    /// Maps a hash to the placeholder range. `i32::MIN` has no i32 absolute
    /// value, hence `unsigned_abs`.
    fn bucket(hash: i32) -> u8 {
        let span = (PLACEHOLDER_MAX - PLACEHOLDER_MIN + 1) as u32;
        PLACEHOLDER_MIN + (hash.unsigned_abs() % span) as u8
    }
}
