//! Rank queries over the BWT: how many occurrences of a symbol precede a
//! position. Two interchangeable strategies with identical observable
//! results: a linear scan with no preprocessing, and per-symbol occurrence
//! bit-vectors with per-word cumulative counts answering in O(1).

/// `rank(c, i)` = number of positions `j < i` with `bwt[j] == c`, for
/// `0 <= i <= n`. Implementations are read-only once built and safe to
/// share across concurrent searches.
pub trait RankOracle {
    fn rank(&self, c: u8, i: usize) -> usize;
}

/// O(i)-per-query rank by scanning the BWT prefix. No preprocessing.
pub struct LinearRank<'a> {
    bwt: &'a [u8],
}

impl<'a> LinearRank<'a> {
    pub fn new(bwt: &'a [u8]) -> Self {
        Self { bwt }
    }
}

impl RankOracle for LinearRank<'_> {
    fn rank(&self, c: u8, i: usize) -> usize {
        self.bwt[..i].iter().filter(|&&b| b == c).count()
    }
}

/// One occurrence bit-vector per symbol, with the cumulative popcount of
/// every 64-bit word stored alongside. A query is one array lookup plus one
/// masked popcount.
struct SymbolBits {
    words: Vec<u64>,
    /// `counts[w]` = set bits in `words[..w]`; one extra slot so `i == n`
    /// on a word boundary stays in bounds.
    counts: Vec<usize>,
}

impl SymbolBits {
    fn rank(&self, i: usize) -> usize {
        let (word, bit) = (i / 64, i % 64);
        let mut r = self.counts[word];
        if bit > 0 {
            r += (self.words[word] & ((1u64 << bit) - 1)).count_ones() as usize;
        }
        r
    }
}

/// Precomputed O(1) rank over the whole BWT. Building is O(n * sigma).
pub struct BlockRank {
    per_symbol: Vec<SymbolBits>,
}

impl BlockRank {
    pub fn new(bwt: &[u8], sigma: usize) -> Self {
        let num_words = bwt.len().div_ceil(64);
        let mut per_symbol: Vec<SymbolBits> = (0..sigma)
            .map(|_| SymbolBits {
                words: vec![0u64; num_words],
                counts: Vec::new(),
            })
            .collect();

        for (i, &c) in bwt.iter().enumerate() {
            per_symbol[c as usize].words[i / 64] |= 1u64 << (i % 64);
        }

        for bits in &mut per_symbol {
            let mut counts = Vec::with_capacity(num_words + 1);
            let mut total = 0usize;
            counts.push(0);
            for &w in &bits.words {
                total += w.count_ones() as usize;
                counts.push(total);
            }
            bits.counts = counts;
        }

        Self { per_symbol }
    }
}

impl RankOracle for BlockRank {
    fn rank(&self, c: u8, i: usize) -> usize {
        self.per_symbol[c as usize].rank(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn block_rank_on_a_small_bwt() {
        let bwt = [2u8, 0, 1, 2, 2, 1];
        let rank = BlockRank::new(&bwt, 4);
        assert_eq!(rank.rank(2, 0), 0);
        assert_eq!(rank.rank(2, 1), 1);
        assert_eq!(rank.rank(2, 4), 2);
        assert_eq!(rank.rank(2, 6), 3);
        assert_eq!(rank.rank(1, 6), 2);
        assert_eq!(rank.rank(0, 6), 1);
        assert_eq!(rank.rank(3, 6), 0);
    }

    #[test]
    fn strategies_agree_on_random_bwts() {
        let mut rng = ChaChaRng::seed_from_u64(99);
        for _ in 0..20 {
            let n = rng.gen_range(0..400);
            let sigma = 16usize;
            let bwt: Vec<u8> = (0..n).map(|_| rng.gen_range(0..sigma as u8)).collect();

            let linear = LinearRank::new(&bwt);
            let block = BlockRank::new(&bwt, sigma);

            for c in 0..sigma as u8 {
                for i in 0..=n {
                    assert_eq!(
                        linear.rank(c, i),
                        block.rank(c, i),
                        "rank({c}, {i}) diverged on bwt of length {n}"
                    );
                }
            }
        }
    }

    #[test]
    fn word_boundary_positions_are_exact() {
        // Length exactly two words; every position of symbol 1.
        let bwt = vec![1u8; 128];
        let block = BlockRank::new(&bwt, 2);
        assert_eq!(block.rank(1, 64), 64);
        assert_eq!(block.rank(1, 128), 128);
        assert_eq!(block.rank(0, 128), 0);
    }
}
