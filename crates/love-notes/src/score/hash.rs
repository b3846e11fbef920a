//! djb2-style name hashing with 32-bit signed wraparound.

const SEED: i32 = 5381;

/// Trims surrounding whitespace and lower-cases.
///
/// The trimmed set is the ECMAScript one: Unicode `White_Space` plus the
/// byte-order mark, minus NEL (U+0085), which browsers keep.
pub fn normalize(name: &str) -> String {
    name.trim_matches(is_trimmable).to_lowercase()
}

fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Hashes a normalized name.
///
/// Each step is `acc = ((acc << 5) + acc) ^ unit` over the UTF-16 code units
/// of `s`, evaluated in `i32` with wraparound. The absolute value of
/// `i32::MIN` does not fit in `i32`, hence the `u32` result.
pub fn name_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(SEED, |acc, unit| {
            acc.wrapping_shl(5).wrapping_add(acc) ^ i32::from(unit)
        })
        .unsigned_abs()
}

/// Length in UTF-16 code units.
pub(crate) fn name_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Folds two hashes into `(-101, 101)`.
///
/// The XOR reinterprets both hashes as `i32`, so a hash of exactly `2^31`
/// turns negative and `%` keeps the dividend's sign.
pub(crate) fn fold_hashes(a: u32, b: u32) -> i32 {
    ((a as i32) ^ (b as i32)) % 101
}
