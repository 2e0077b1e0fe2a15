use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rangefold::monoid::{Concat, Max, Min, Sum};
use rangefold::{Monoid, SegmentTree};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rangefold", about = "Range folds over static sequences using a segment tree")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold ranges of a sequence with a built-in operation.
    Query {
        /// Operation to fold with.
        #[arg(long, value_enum, default_value_t = Operation::Sum)]
        op: Operation,
        /// File holding the sequence (whitespace or comma separated integers; raw text for `concat`).
        #[arg(long, conflicts_with = "values", required_unless_present = "values")]
        file: Option<PathBuf>,
        /// Inline sequence, same format as `--file`.
        #[arg(long)]
        values: Option<String>,
        /// Half-open ranges written as `start..end`.
        #[arg(required = true, value_parser = parse_range)]
        ranges: Vec<(usize, usize)>,
    },
    /// Check random sums and concatenations against a brute-force fold.
    Selftest {
        /// Sequence length.
        #[arg(long, default_value_t = 100)]
        size: usize,
        /// Seed for the random sequences.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Operation {
    Sum,
    Min,
    Max,
    Concat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Query {
            op,
            file,
            values,
            ranges,
        } => run_query(op, file, values, &ranges)?,
        Commands::Selftest { size, seed } => {
            run_selftest(size, seed)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_range(arg: &str) -> std::result::Result<(usize, usize), String> {
    let (start, end) = arg
        .split_once("..")
        .ok_or_else(|| format!("expected `start..end`, got '{}'", arg))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid range start '{}': {}", start, e))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid range end '{}': {}", end, e))?;
    Ok((start, end))
}

fn run_query(
    op: Operation,
    file: Option<PathBuf>,
    values: Option<String>,
    ranges: &[(usize, usize)],
) -> Result<()> {
    let source = match (file, values) {
        (Some(path), _) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read sequence from {}", path.display()))?,
        (None, Some(inline)) => inline,
        (None, None) => bail!("either --file or --values is required"),
    };

    for line in answer_queries(op, &source, ranges)? {
        println!("{}", line);
    }
    Ok(())
}

fn answer_queries(op: Operation, source: &str, ranges: &[(usize, usize)]) -> Result<Vec<String>> {
    match op {
        Operation::Sum => {
            // i128 holds any sum of i64 inputs exactly
            let values = parse_integers(source)?.into_iter().map(i128::from);
            let tree = SegmentTree::build(values, Sum::<i128>::new())?;
            fold_lines(&tree, ranges)
        }
        Operation::Min => {
            let tree = SegmentTree::build(parse_integers(source)?, Min::<i64>::new())?;
            fold_lines(&tree, ranges)
        }
        Operation::Max => {
            let tree = SegmentTree::build(parse_integers(source)?, Max::<i64>::new())?;
            fold_lines(&tree, ranges)
        }
        Operation::Concat => {
            let text = source.trim_end_matches(['\r', '\n']);
            let tree = SegmentTree::build(text.chars().map(String::from), Concat)?;
            fold_lines(&tree, ranges)
        }
    }
}

fn parse_integers(source: &str) -> Result<Vec<i64>> {
    source
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(idx, token)| {
            token
                .parse()
                .with_context(|| format!("invalid integer '{}' at position {}", token, idx))
        })
        .collect()
}

fn fold_lines<M>(tree: &SegmentTree<M>, ranges: &[(usize, usize)]) -> Result<Vec<String>>
where
    M: Monoid,
    M::Value: Display,
{
    debug!(
        len = tree.len(),
        leaves = tree.leaf_count(),
        "answering {} ranges",
        ranges.len()
    );

    ranges
        .iter()
        .map(|&(start, end)| {
            let value = tree
                .query(start, end)
                .with_context(|| format!("query [{}, {}) failed", start, end))?;
            Ok(format!("[{}, {})\t{}", start, end, value))
        })
        .collect()
}

fn run_selftest(size: usize, seed: u64) -> Result<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mismatches = 0usize;
    let mut checked = 0usize;

    let values: Vec<i64> = (0..size).map(|_| rng.gen_range(-1000..1000)).collect();
    let sums = SegmentTree::build(values.iter().copied(), Sum::<i64>::new())
        .context("failed to build summation tree")?;
    for start in 0..size {
        for end in start..=size {
            let expected: i64 = values[start..end].iter().sum();
            let actual = sums.query(start, end)?;
            checked += 1;
            if actual != expected {
                error!(start, end, expected, actual, "summation mismatch");
                mismatches += 1;
            }
        }
    }

    // noncommutative: any reordering of children shows up here
    let text: String = (0..size).map(|_| rng.gen_range('a'..='z')).collect();
    let substrings = SegmentTree::build(text.chars().map(String::from), Concat)
        .context("failed to build concatenation tree")?;
    for start in 0..size {
        for end in start..=size {
            let actual = substrings.query(start, end)?;
            checked += 1;
            if actual != text[start..end] {
                error!(start, end, %actual, "concatenation mismatch");
                mismatches += 1;
            }
        }
    }

    info!(size, seed, checked, mismatches, "selftest finished");

    if mismatches > 0 {
        bail!("{} of {} range folds disagreed with the brute-force fold", mismatches, checked);
    }
    println!("selftest passed: {} ranges checked (size={}, seed={})", checked, size, seed);
    Ok(checked)
}
