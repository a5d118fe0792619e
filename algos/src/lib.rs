mod bucket;
mod range;
mod rank;
mod suffix;

pub mod multiletter;
pub mod rangeset;
pub mod search;

pub use bucket::{bucket_start, buckets, frequency};
pub use multiletter::{Alphabet, MaskLetter, MultiLetter, SetLetter, acgt_alphabet};
pub use range::Range;
pub use rangeset::RangeSet;
pub use rank::{BlockRank, LinearRank, RankOracle};
pub use search::{DegenerateIndex, backward_search, extract_positions};
pub use suffix::{build_bwt, build_suffix_array};

/// Letter code of the text terminator. The terminator must occur exactly
/// once in a text, at the final position, so that the whole string is the
/// lexicographically smallest suffix.
pub const TERMINATOR: u8 = 0;
