use std::{fmt::Debug, hash::Hash};
use trait_set::trait_set;

trait_set!
{
    /// Trait for any type that can represent an individual letter in a [suchsel](crate::suchsel::Suchsel) grid.
    ///
    /// `u8` and `char` both qualify, `Into<char>` is only used for the text dump.
    pub trait SuchselChar = Eq + PartialEq + Ord + PartialOrd + Copy + Default + Debug + Hash + Into<char> + Send + Sync + 'static;
}

/// Returns true if `needle` occurs as a contiguous run inside `haystack`.
///
/// An empty needle is contained in everything.
pub fn contains_run<CharT: SuchselChar>(haystack: &[CharT], needle: &[CharT]) -> bool
{
    if needle.is_empty() { return true; }
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_contains_run()
    {
        assert!(contains_run(b"CATCAT", b"TCA"));
        assert!(contains_run(b"CAT", b"CAT"));
        assert!(contains_run(b"CAT", b""));
        assert!(!contains_run(b"CA", b"CAT"));
        assert!(!contains_run(b"CAT", b"TAC"));
    }
}
