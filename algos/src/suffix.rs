//! Suffix array and BWT derivation for a resolved text.
//!
//! The suffix array builder is a comparison-sort baseline, correct for any
//! text whose terminator is its unique smallest code at the final position.
//! A linear-time builder is a drop-in replacement: only the permutation
//! contract matters to the rest of the crate.

use crate::TERMINATOR;

/// Permutation of `[0, n)` ordering the suffixes of `text`
/// lexicographically. Requires the terminator invariant, which makes the
/// whole string the smallest suffix (`sa[0] == n - 1`).
pub fn build_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();
    sa.sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    sa
}

/// `bwt[i] = text[sa[i] - 1]`, with the terminator standing in for the
/// character before position 0.
pub fn build_bwt(text: &[u8], sa: &[usize]) -> Vec<u8> {
    sa.iter()
        .map(|&p| if p == 0 { TERMINATOR } else { text[p - 1] })
        .collect()
}
