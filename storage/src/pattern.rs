//! Degenerate pattern file parser.
//!
//! A block begins with a line starting `>`. Every following non-header line
//! encodes one pattern position as four space-separated bits `b0 b1 b2 b3`,
//! each '0' or '1', marking base `i` as a candidate. The line must be
//! exactly 7 characters (8 with a trailing carriage return); any violation
//! aborts the parse.

use anyhow::{Result, bail};
use std::fs;
use std::path::Path;
use std::str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRecord {
    pub header: String,
    /// One possibly-degenerate letter code per pattern position.
    pub codes: Vec<u8>,
}

/// Parses every pattern block in the buffer.
pub fn parse_patterns(raw: &[u8]) -> Result<Vec<PatternRecord>> {
    let mut records: Vec<PatternRecord> = Vec::new();

    for line in raw.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        if line[0] == b'>' {
            finish_block(&records)?;
            let header = match str::from_utf8(&line[1..]) {
                Ok(h) => h.trim().to_string(),
                Err(_) => bail!("pattern header is not valid UTF-8"),
            };
            records.push(PatternRecord {
                header,
                codes: Vec::new(),
            });
            continue;
        }

        let Some(record) = records.last_mut() else {
            bail!("pattern line before the first '>' header");
        };
        record.codes.push(parse_position(line)?);
    }

    finish_block(&records)?;
    if records.is_empty() {
        bail!("missing '>' header");
    }

    Ok(records)
}

pub fn read_patterns(path: &Path) -> Result<Vec<PatternRecord>> {
    let raw = fs::read(path)?;
    parse_patterns(&raw)
}

/// A finished block must carry at least one position; an empty pattern can
/// never be searched.
fn finish_block(records: &[PatternRecord]) -> Result<()> {
    if let Some(last) = records.last()
        && last.codes.is_empty()
    {
        bail!("pattern block {:?} has no positions", last.header);
    }
    Ok(())
}

/// One `b0 b1 b2 b3` line into a letter code; bit `i` set iff `b_i` is '1'.
fn parse_position(line: &[u8]) -> Result<u8> {
    if line.len() != 7 {
        bail!("pattern line must be 7 characters, got {}", line.len());
    }

    let mut code = 0u8;
    for (slot, at) in [0usize, 2, 4, 6].into_iter().enumerate() {
        match line[at] {
            b'0' => {}
            b'1' => code |= 1 << slot,
            other => bail!("expected '0' or '1', got {:?}", other as char),
        }
        if at < 6 && line[at + 1] != b' ' {
            bail!("pattern bits must be space-separated");
        }
    }

    Ok(code)
}
