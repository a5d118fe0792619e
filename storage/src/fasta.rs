//! FASTA-like resolved text parser.
//!
//! A record is a header line starting with `>` followed by sequence lines
//! containing only A, C, G and T (carriage returns and line feeds are
//! ignorable). Any other character is a format error. The parser appends
//! exactly one terminator code to every record's letter-code sequence.

use anyhow::{Result, bail};
use std::fs;
use std::path::Path;
use std::str;

use algos::TERMINATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub header: String,
    /// Letter codes, terminator included as the final element.
    pub codes: Vec<u8>,
}

/// Parses every record in a FASTA-like byte buffer.
pub fn parse_texts(raw: &[u8]) -> Result<Vec<TextRecord>> {
    let mut records: Vec<TextRecord> = Vec::new();

    for line in raw.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        if line[0] == b'>' {
            if let Some(last) = records.last_mut() {
                last.codes.push(TERMINATOR);
            }
            let header = match str::from_utf8(&line[1..]) {
                Ok(h) => h.trim().to_string(),
                Err(_) => bail!("text header is not valid UTF-8"),
            };
            records.push(TextRecord {
                header,
                codes: Vec::new(),
            });
            continue;
        }

        let Some(record) = records.last_mut() else {
            bail!("sequence data before the first '>' header");
        };
        for &b in line {
            match b {
                b'A' => record.codes.push(1),
                b'C' => record.codes.push(2),
                b'G' => record.codes.push(4),
                b'T' => record.codes.push(8),
                _ => bail!("invalid character {:?} in sequence data", b as char),
            }
        }
    }

    match records.last_mut() {
        Some(last) => last.codes.push(TERMINATOR),
        None => bail!("missing '>' header"),
    }

    Ok(records)
}

pub fn read_texts(path: &Path) -> Result<Vec<TextRecord>> {
    let raw = fs::read(path)?;
    parse_texts(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_records() {
        let raw = b"> text1\nACGT\nAC\n> text2\nTTT\n";
        let records = parse_texts(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "text1");
        assert_eq!(records[0].codes, vec![1, 2, 4, 8, 1, 2, 0]);
        assert_eq!(records[1].header, "text2");
        assert_eq!(records[1].codes, vec![8, 8, 8, 0]);
    }

    #[test]
    fn carriage_returns_are_ignored() {
        let raw = b">t\r\nAC\r\nGT\r\n";
        let records = parse_texts(raw).unwrap();
        assert_eq!(records[0].codes, vec![1, 2, 4, 8, 0]);
    }

    #[test]
    fn exactly_one_terminator_lands_at_the_end() {
        let records = parse_texts(b">t\nACGT\n").unwrap();
        let codes = &records[0].codes;
        assert_eq!(codes.iter().filter(|&&c| c == TERMINATOR).count(), 1);
        assert_eq!(*codes.last().unwrap(), TERMINATOR);
    }

    #[test]
    fn rejects_foreign_characters() {
        let err = parse_texts(b">t\nACXT\n").unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn rejects_data_before_header() {
        let err = parse_texts(b"ACGT\n>t\n").unwrap_err();
        assert!(err.to_string().contains("before the first"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_texts(b"").is_err());
    }
}
