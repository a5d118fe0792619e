//! Degenerate backward search over the BWT.
//!
//! Generalizes FM-index backward search in two ways: the match predicate
//! between a pattern symbol and a text symbol is non-empty intersection of
//! their candidate sets rather than equality, and the working state is a set
//! of disjoint suffix-array ranges rather than one range, because a single
//! degenerate pattern symbol may admit several text letter codes.

use log::debug;

use crate::{
    Alphabet, BlockRank, MultiLetter, Range, RangeSet, RankOracle, TERMINATOR, buckets, build_bwt,
    build_suffix_array,
};

/// Walks `pattern` right to left, narrowing a [`RangeSet`] of suffix-array
/// ranges consistent with the suffix of the pattern seen so far.
///
/// `c` is the bucket-start array over the text's BWT (`sigma + 1` entries)
/// and `rank` a rank oracle over the same BWT. The pattern must be
/// non-empty; the caller validates input upstream.
pub fn backward_search<M: MultiLetter, R: RankOracle>(
    pattern: &[u8],
    alpha_pattern: &Alphabet<M>,
    alpha_text: &Alphabet<M>,
    c: &[usize],
    rank: &R,
) -> RangeSet {
    let m = pattern.len();
    let sigma = alpha_text.len();
    assert!(m > 0, "pattern must be non-empty");
    assert_eq!(c.len(), sigma + 1, "bucket array must have sigma + 1 slots");

    let mut working = RangeSet::new();

    // Seed with the buckets of every text letter the last pattern symbol
    // could stand for.
    let last = &alpha_pattern[pattern[m - 1] as usize];
    for i in 0..sigma {
        if alpha_text[i].intersects(last) && c[i] < c[i + 1] {
            working.insert(Range::new(c[i], c[i + 1] - 1));
        }
    }

    let mut k = m - 1;
    while !working.is_empty() && k > 0 {
        k -= 1;
        let wanted = &alpha_pattern[pattern[k] as usize];
        let mut next = RangeSet::new();
        for r in &working {
            for i in 0..sigma {
                if alpha_text[i].intersects(wanted) {
                    let r1 = rank.rank(i as u8, r.low());
                    let r2 = rank.rank(i as u8, r.high() + 1);
                    if r1 < r2 {
                        next.insert(Range::new(c[i] + r1, c[i] + r2 - 1));
                    }
                }
            }
        }
        working = next;
        debug!("backward search at k = {k}: {} range(s)", working.len());
    }

    working
}

/// Maps a finished range set to concrete 0-based text positions through the
/// suffix array.
pub fn extract_positions(result: &RangeSet, sa: &[usize]) -> Vec<usize> {
    let mut positions = Vec::new();
    for r in result {
        for p in r.low()..=r.high() {
            positions.push(sa[p]);
        }
    }
    positions
}

/// Index built once per resolved text: suffix array, BWT, bucket starts and
/// the precomputed rank oracle. Immutable after construction; independent
/// searches may share it freely.
pub struct DegenerateIndex<M> {
    sa: Vec<usize>,
    bwt: Vec<u8>,
    c: Vec<usize>,
    rank: BlockRank,
    alpha: Alphabet<M>,
}

impl<M: MultiLetter> DegenerateIndex<M> {
    /// Builds the index. The text must carry exactly one terminator, at the
    /// final position; anything else is a caller bug.
    pub fn build(text: &[u8], alpha: Alphabet<M>) -> Self {
        assert!(
            text.last() == Some(&TERMINATOR),
            "text must end with the terminator code"
        );
        assert_eq!(
            text.iter().filter(|&&b| b == TERMINATOR).count(),
            1,
            "terminator must occur exactly once"
        );

        let sa = build_suffix_array(text);
        let bwt = build_bwt(text, &sa);
        let c = buckets(&bwt, alpha.len());
        let rank = BlockRank::new(&bwt, alpha.len());
        debug!("built index over {} symbols", bwt.len());

        Self {
            sa,
            bwt,
            c,
            rank,
            alpha,
        }
    }

    /// Indexed text length, terminator included.
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    pub fn suffix_array(&self) -> &[usize] {
        &self.sa
    }

    pub fn bwt(&self) -> &[u8] {
        &self.bwt
    }

    pub fn bucket_starts(&self) -> &[usize] {
        &self.c
    }

    pub fn alphabet(&self) -> &Alphabet<M> {
        &self.alpha
    }

    /// The suffix-array ranges matching `pattern` under possible-match
    /// semantics. An empty result means the pattern provably cannot occur.
    pub fn search_ranges(&self, pattern: &[u8], alpha_pattern: &Alphabet<M>) -> RangeSet {
        backward_search(pattern, alpha_pattern, &self.alpha, &self.c, &self.rank)
    }

    /// All 0-based text positions where `pattern` could align, ascending.
    pub fn search(&self, pattern: &[u8], alpha_pattern: &Alphabet<M>) -> Vec<usize> {
        let ranges = self.search_ranges(pattern, alpha_pattern);
        let mut positions = extract_positions(&ranges, &self.sa);
        positions.sort_unstable();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearRank, acgt_alphabet};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn index_of(text: &[u8]) -> DegenerateIndex<crate::MaskLetter> {
        DegenerateIndex::build(text, acgt_alphabet())
    }

    /// Position-by-position possible-match scan, the simplest oracle.
    fn naive_scan<M: MultiLetter>(
        text: &[u8],
        alpha_text: &Alphabet<M>,
        pattern: &[u8],
        alpha_pattern: &Alphabet<M>,
    ) -> Vec<usize> {
        let n = text.len();
        let m = pattern.len();
        let mut out = Vec::new();
        if m > n {
            return out;
        }
        'outer: for start in 0..=n - m {
            for j in 0..m {
                let t = &alpha_text[text[start + j] as usize];
                let p = &alpha_pattern[pattern[j] as usize];
                if !t.intersects(p) {
                    continue 'outer;
                }
            }
            out.push(start);
        }
        out
    }

    /// The naive-rank, list-based working-set variant, kept purely as a
    /// cross-checking oracle.
    fn backward_search_list<M: MultiLetter>(
        pattern: &[u8],
        alpha_pattern: &Alphabet<M>,
        alpha_text: &Alphabet<M>,
        c: &[usize],
        bwt: &[u8],
        sa: &[usize],
    ) -> Vec<usize> {
        let rank = LinearRank::new(bwt);
        let sigma = alpha_text.len();
        let m = pattern.len();

        let mut working: Vec<Range> = Vec::new();
        let last = &alpha_pattern[pattern[m - 1] as usize];
        for i in 0..sigma {
            if alpha_text[i].intersects(last) && c[i] < c[i + 1] {
                working.push(Range::new(c[i], c[i + 1] - 1));
            }
        }

        let mut k = m - 1;
        while !working.is_empty() && k > 0 {
            k -= 1;
            let wanted = &alpha_pattern[pattern[k] as usize];
            let mut next = Vec::new();
            for r in &working {
                for i in 0..sigma {
                    if alpha_text[i].intersects(wanted) {
                        let r1 = rank.rank(i as u8, r.low());
                        let r2 = rank.rank(i as u8, r.high() + 1);
                        if r1 < r2 {
                            next.push(Range::new(c[i] + r1, c[i] + r2 - 1));
                        }
                    }
                }
            }
            working = next;
        }

        let mut positions = Vec::new();
        for r in &working {
            for p in r.low()..=r.high() {
                positions.push(sa[p]);
            }
        }
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    #[test]
    fn exact_match_reduction() {
        // Text A C G T + terminator; pattern C G.
        let index = index_of(&[1, 2, 4, 8, 0]);
        assert_eq!(index.search(&[2, 4], &acgt_alphabet()), vec![1]);
    }

    #[test]
    fn degenerate_pattern_symbol_matches_any_candidate() {
        let index = index_of(&[1, 2, 4, 8, 0]);
        // Position 0 is {A, C} (code 3), position 1 is G. Matches "C G" at
        // offset 1 but not "G T" at offset 2.
        assert_eq!(index.search(&[3, 4], &acgt_alphabet()), vec![1]);
    }

    #[test]
    fn absent_pattern_yields_empty_result() {
        let index = index_of(&[1, 2, 4, 8, 0]);
        // "T A" never occurs.
        assert!(index.search(&[8, 1], &acgt_alphabet()).is_empty());
        assert!(
            index
                .search_ranges(&[8, 1], &acgt_alphabet())
                .is_empty()
        );
    }

    #[test]
    fn repeated_searches_are_identical() {
        // A C A C A + terminator.
        let index = index_of(&[1, 2, 1, 2, 1, 0]);
        let alpha = acgt_alphabet();
        let first = index.search(&[1, 2], &alpha);
        assert_eq!(first, vec![0, 2]);
        for _ in 0..3 {
            assert_eq!(index.search(&[1, 2], &alpha), first);
        }
    }

    #[test]
    fn single_symbol_pattern_hits_every_occurrence() {
        // G A G A G + terminator.
        let index = index_of(&[4, 1, 4, 1, 4, 0]);
        assert_eq!(index.search(&[4], &acgt_alphabet()), vec![0, 2, 4]);
        // {A, G} (code 5) hits everything but the terminator.
        assert_eq!(
            index.search(&[5], &acgt_alphabet()),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    #[should_panic(expected = "terminator")]
    fn text_without_terminator_is_rejected() {
        index_of(&[1, 2, 4, 8]);
    }

    #[test]
    #[should_panic(expected = "pattern must be non-empty")]
    fn empty_pattern_is_rejected() {
        let index = index_of(&[1, 2, 4, 8, 0]);
        index.search(&[], &acgt_alphabet());
    }

    #[test]
    fn variants_agree_on_random_inputs() {
        let alpha = acgt_alphabet();
        let mut rng = ChaChaRng::seed_from_u64(2024);

        for _ in 0..40 {
            let n = rng.gen_range(1..60);
            let mut text: Vec<u8> = (0..n).map(|_| 1u8 << rng.gen_range(0..4)).collect();
            text.push(TERMINATOR);

            let m = rng.gen_range(1..=6.min(n));
            // Degenerate pattern codes: any non-empty subset of the bases.
            let pattern: Vec<u8> = (0..m).map(|_| rng.gen_range(1..16)).collect();

            let index = DegenerateIndex::build(&text, alpha.clone());
            let reference = index.search(&pattern, &alpha);

            // Oracle 1: direct possible-match scan over the text.
            let scanned = naive_scan(&text, &alpha, &pattern, &alpha);
            assert_eq!(reference, scanned, "text {text:?} pattern {pattern:?}");

            // Oracle 2: linear rank with a plain list working set.
            let listed = backward_search_list(
                &pattern,
                &alpha,
                &alpha,
                index.bucket_starts(),
                index.bwt(),
                index.suffix_array(),
            );
            assert_eq!(reference, listed, "text {text:?} pattern {pattern:?}");

            // Oracle 3: the reference loop driven by the linear oracle.
            let linear = LinearRank::new(index.bwt());
            let via_linear = {
                let ranges =
                    backward_search(&pattern, &alpha, &alpha, index.bucket_starts(), &linear);
                let mut v = extract_positions(&ranges, index.suffix_array());
                v.sort_unstable();
                v
            };
            assert_eq!(reference, via_linear);
        }
    }

    #[test]
    fn set_letter_alphabet_behaves_like_mask_alphabet() {
        use crate::SetLetter;

        let mask_alpha = acgt_alphabet();
        let set_alpha: Alphabet<SetLetter> = Alphabet::new(
            (0..16u64)
                .map(|bits| {
                    let mut l = SetLetter::empty();
                    for b in 0..4 {
                        if bits & (1 << b) != 0 {
                            l.add(b);
                        }
                    }
                    l
                })
                .collect(),
        );

        let text = [2u8, 1, 2, 4, 2, 8, 0];
        let pattern = [2u8, 12]; // C then {G, T}

        let mask_index = DegenerateIndex::build(&text, mask_alpha.clone());
        let set_index = DegenerateIndex::build(&text, set_alpha.clone());

        assert_eq!(
            mask_index.search(&pattern, &mask_alpha),
            set_index.search(&pattern, &set_alpha)
        );
    }
}
