use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use engine::{build_index, execute_all};
use storage::{fasta, generate, pattern};

/// Example:
/// cargo run --release -- gen-text --count 1 --length 10000 -o text.fa
/// cargo run --release -- gen-pattern --count 5 --length 20 --degenerate 3 -o patterns.txt
/// cargo run --release -- search -p patterns.txt -i text.fa --measure-time
#[derive(Debug, clap::Parser)]
#[command(
    name = "degenerate-search",
    about = "Possible-match pattern search in resolved texts with a degenerate BWT backward search"
)]
enum Cli {
    /// Search every pattern block against every text record
    Search {
        /// Path of the degenerate pattern file
        #[arg(short = 'p', long = "pattern-file", value_name = "PATTERN_FILE")]
        pattern_file: PathBuf,

        /// Path of the text file
        #[arg(short = 'i', long = "input-file", value_name = "TEXT_FILE")]
        input_file: PathBuf,

        /// Optional output file; if omitted, results are written to stdout
        #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Measure and print index build and search time
        #[arg(long)]
        measure_time: bool,
    },
    /// Generate random solid texts in the FASTA-like format
    GenText {
        #[arg(long, default_value_t = 1)]
        count: usize,

        #[arg(long)]
        length: usize,

        #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate random pattern blocks with a fixed number of degenerate positions
    GenPattern {
        #[arg(long, default_value_t = 1)]
        count: usize,

        #[arg(long)]
        length: usize,

        /// Number of degenerate positions per pattern
        #[arg(long, default_value_t = 0)]
        degenerate: usize,

        #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse() {
        Cli::Search {
            pattern_file,
            input_file,
            output,
            measure_time,
        } => search(&pattern_file, &input_file, output, measure_time),
        Cli::GenText {
            count,
            length,
            output,
            seed,
        } => {
            let mut out = open_output(output)?;
            let mut rng = make_rng(seed);
            for i in 0..count {
                let codes = generate::solid_text(&mut rng, length);
                generate::write_text(&mut out, &format!("text{}", i + 1), &codes)?;
            }
            Ok(())
        }
        Cli::GenPattern {
            count,
            length,
            degenerate,
            output,
            seed,
        } => {
            let mut out = open_output(output)?;
            let mut rng = make_rng(seed);
            for i in 0..count {
                let codes = generate::degenerate_codes(&mut rng, length, degenerate);
                let name = format!("pattern {} {}", i + 1, degenerate);
                generate::write_pattern(&mut out, &name, &codes)?;
            }
            Ok(())
        }
    }
}

fn search(
    pattern_file: &PathBuf,
    input_file: &PathBuf,
    output: Option<PathBuf>,
    measure_time: bool,
) -> Result<()> {
    let patterns = pattern::read_patterns(pattern_file)?;
    let texts = fasta::read_texts(input_file)?;
    let mut out = open_output(output)?;

    for text in &texts {
        let build_start = Instant::now();
        let index = build_index(text);
        let build_time = build_start.elapsed();

        let search_start = Instant::now();
        let matches = execute_all(&index, &patterns);
        let search_time = search_start.elapsed();

        writeln!(out, "text={:?}", text.header)?;
        for m in &matches {
            writeln!(
                out,
                "pattern {} ({:?}): {} result(s)",
                m.pattern_index + 1,
                m.pattern.header,
                m.positions.len()
            )?;
            writeln!(out, "positions: {:?}", m.positions)?;
        }
        if measure_time {
            writeln!(out, "index_build_time: {}ns", build_time.as_nanos())?;
            writeln!(out, "search_time: {}ns", search_time.as_nanos())?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn open_output(path: Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(ref p) => Box::new(File::create(p)?),
        None => Box::new(io::stdout()),
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
