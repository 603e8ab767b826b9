//! Suffix helpers for count messages.

/// "" for one, "s" otherwise.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// "y" for one, "ies" otherwise, for nouns like "activity".
#[inline]
pub fn plural_ies(n: usize) -> &'static str {
    if n == 1 { "y" } else { "ies" }
}

/// `1 file`, `3 files`. Regular nouns only; irregular ones pair
/// `plural_ies` with the stem at the call site.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
