//! Degenerate symbols: a position that may stand for any of a subset of base
//! letters rather than exactly one.
//!
//! Two representations back the same contract. [`MaskLetter`] packs the
//! subset into a fixed-width bitmask and is the right choice for small fixed
//! universes such as A/C/G/T. [`SetLetter`] keeps a sorted list of base codes
//! and works for any universe. Which one an [`Alphabet`] is built from is a
//! construction-time choice; callers only ever see the trait.

use std::ops::Index;

/// A non-empty subset of base letters (empty only as a terminator meaning).
///
/// `contains`, `intersects` and equality are pure; `bases` yields the member
/// base codes in ascending order and can be restarted by calling it again.
pub trait MultiLetter: Clone + PartialEq {
    fn empty() -> Self;

    fn add(&mut self, base: u8);

    fn contains(&self, base: u8) -> bool;

    /// True iff the two subsets share at least one base letter.
    fn intersects(&self, other: &Self) -> bool;

    fn bases(&self) -> impl Iterator<Item = u8> + '_;

    fn from_bases(bases: &[u8]) -> Self {
        let mut letter = Self::empty();
        for &b in bases {
            letter.add(b);
        }
        letter
    }
}

/// Bit-packed multi-letter for universes of at most 64 base letters.
/// Bit `i` set means base `i` is a candidate. All operations are O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskLetter {
    bits: u64,
}

impl MaskLetter {
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }
}

impl MultiLetter for MaskLetter {
    fn empty() -> Self {
        Self { bits: 0 }
    }

    fn add(&mut self, base: u8) {
        debug_assert!(base < 64, "base code out of mask universe");
        self.bits |= 1 << base;
    }

    fn contains(&self, base: u8) -> bool {
        base < 64 && self.bits & (1 << base) != 0
    }

    fn intersects(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    fn bases(&self) -> impl Iterator<Item = u8> + '_ {
        let mut bits = self.bits;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let base = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(base)
        })
    }
}

/// Sorted-list multi-letter for arbitrary universes. Operations are O(k) in
/// the subset size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetLetter {
    bases: Vec<u8>,
}

impl MultiLetter for SetLetter {
    fn empty() -> Self {
        Self { bases: Vec::new() }
    }

    fn add(&mut self, base: u8) {
        if let Err(at) = self.bases.binary_search(&base) {
            self.bases.insert(at, base);
        }
    }

    fn contains(&self, base: u8) -> bool {
        self.bases.binary_search(&base).is_ok()
    }

    fn intersects(&self, other: &Self) -> bool {
        // Both lists are sorted, so a single merge walk suffices.
        let mut a = self.bases.iter().peekable();
        let mut b = other.bases.iter().peekable();
        while let (Some(&&x), Some(&&y)) = (a.peek(), b.peek()) {
            if x == y {
                return true;
            }
            if x < y {
                a.next();
            } else {
                b.next();
            }
        }
        false
    }

    fn bases(&self) -> impl Iterator<Item = u8> + '_ {
        self.bases.iter().copied()
    }
}

/// Total mapping from letter codes `[0, sigma)` to their multi-letter
/// meaning. Interprets both resolved text codes (normally singleton sets)
/// and possibly-degenerate pattern codes.
#[derive(Debug, Clone)]
pub struct Alphabet<M> {
    letters: Box<[M]>,
}

impl<M: MultiLetter> Alphabet<M> {
    pub fn new(letters: Vec<M>) -> Self {
        Self {
            letters: letters.into_boxed_slice(),
        }
    }

    /// Number of letter codes, `sigma`.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> + '_ {
        self.letters.iter()
    }
}

impl<M> Index<usize> for Alphabet<M> {
    type Output = M;

    fn index(&self, code: usize) -> &M {
        &self.letters[code]
    }
}

/// The concrete A/C/G/T alphabet: 16 letter codes where bit 0..=3 of the
/// code mark A, C, G and T as candidates. Code 0 is the terminator and maps
/// to the empty set, so it never intersects anything.
pub fn acgt_alphabet() -> Alphabet<MaskLetter> {
    Alphabet::new((0..16).map(MaskLetter::from_bits).collect())
}
