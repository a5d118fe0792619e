//! Random test-data synthesis: solid texts, conservatively degenerate
//! patterns, and writers emitting the two file formats the parsers accept.

use rand::Rng;
use std::io::{self, Write};

use crate::{BASE_CHARS, BASE_CODES};
use algos::TERMINATOR;

/// Sequence line width in written text files.
const TEXT_WRAP: usize = 70;

/// Uniform resolved codes, no terminator.
pub fn solid_codes<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| BASE_CODES[rng.gen_range(0..4)]).collect()
}

/// Uniform resolved text ready for indexing: solid codes plus terminator.
pub fn solid_text<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    let mut codes = solid_codes(rng, len);
    codes.push(TERMINATOR);
    codes
}

/// A solid sequence with exactly `num_degen` distinct positions replaced by
/// degenerate codes (candidate sets of size other than one).
pub fn degenerate_codes<R: Rng>(rng: &mut R, len: usize, num_degen: usize) -> Vec<u8> {
    assert!(num_degen <= len, "cannot degenerate more positions than exist");
    let mut codes = solid_codes(rng, len);

    for _ in 0..num_degen {
        let mut pos = rng.gen_range(0..len);
        while codes[pos].count_ones() != 1 {
            pos = rng.gen_range(0..len);
        }
        let mut code = rng.gen_range(1..16u8);
        while code.count_ones() == 1 {
            code = rng.gen_range(1..16u8);
        }
        codes[pos] = code;
    }

    codes
}

/// Writes one text record: header, then the bases wrapped at 70 columns.
/// `codes` must be solid; a trailing terminator is skipped.
pub fn write_text<W: Write>(out: &mut W, name: &str, codes: &[u8]) -> io::Result<()> {
    writeln!(out, "> {name}")?;
    let body = codes.strip_suffix(&[TERMINATOR]).unwrap_or(codes);
    for (i, &code) in body.iter().enumerate() {
        if i > 0 && i % TEXT_WRAP == 0 {
            writeln!(out)?;
        }
        let base = code.trailing_zeros() as usize;
        debug_assert_eq!(code.count_ones(), 1, "text codes must be solid");
        write!(out, "{}", BASE_CHARS[base])?;
    }
    writeln!(out)
}

/// Writes one pattern block: header, then one `b0 b1 b2 b3` line per
/// position.
pub fn write_pattern<W: Write>(out: &mut W, name: &str, codes: &[u8]) -> io::Result<()> {
    writeln!(out, "> {name}")?;
    for &code in codes {
        writeln!(
            out,
            "{} {} {} {}",
            code & 1,
            (code >> 1) & 1,
            (code >> 2) & 1,
            (code >> 3) & 1
        )?;
    }
    Ok(())
}
