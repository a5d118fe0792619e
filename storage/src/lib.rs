//! File formats and test-data synthesis around the search core.
//!
//! Texts are FASTA-like resolved A/C/G/T sequences; patterns are degenerate,
//! one candidate bitmap per position. Both parse into letter codes where bit
//! `i` of a code marks base `i` (A, C, G, T) as a candidate, and code 0 is
//! the text terminator.

pub mod fasta;
pub mod generate;
pub mod pattern;

/// Letter codes of the four resolved bases, in base order.
pub const BASE_CODES: [u8; 4] = [1, 2, 4, 8];

/// Display characters of the four bases, in base order.
pub const BASE_CHARS: [char; 4] = ['A', 'C', 'G', 'T'];
