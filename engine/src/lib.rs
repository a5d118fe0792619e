//! Orchestration: assemble an index from a parsed text record and run one
//! or many degenerate patterns against it.

use log::debug;

use algos::{DegenerateIndex, MaskLetter, acgt_alphabet};
use storage::fasta::TextRecord;
use storage::pattern::PatternRecord;

#[derive(Debug, Clone)]
pub struct Match<'a> {
    pub pattern_index: usize,
    pub pattern: &'a PatternRecord,
    pub positions: Vec<usize>,
}

/// Builds the one-shot immutable index for a text record.
pub fn build_index(text: &TextRecord) -> DegenerateIndex<MaskLetter> {
    debug!(
        "indexing text {:?} ({} symbols)",
        text.header,
        text.codes.len()
    );
    DegenerateIndex::build(&text.codes, acgt_alphabet())
}

/// All possible-match positions of one pattern, ascending.
pub fn execute(index: &DegenerateIndex<MaskLetter>, pattern: &PatternRecord) -> Vec<usize> {
    index.search(&pattern.codes, &acgt_alphabet())
}

/// Runs every pattern against the index.
pub fn execute_all<'p>(
    index: &DegenerateIndex<MaskLetter>,
    patterns: &'p [PatternRecord],
) -> Vec<Match<'p>> {
    patterns
        .iter()
        .enumerate()
        .map(|(pattern_index, pattern)| Match {
            pattern_index,
            pattern,
            positions: execute(index, pattern),
        })
        .collect()
}
