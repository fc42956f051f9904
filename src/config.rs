//! # Configuration Logic
//!
//! ## Role
//! CLI argument parsing and validation for the `parsum` batch driver.
//!
//! ## Validation
//! - Worker count must be at least 1 (`InvalidConfiguration` otherwise)
//! - Exactly one matrix source: `--input` or `--generate`
//! - Input file must exist (`-` means stdin)
//!
//! ## Example CLI
//! ```bash
//! parsum --input matrix.txt --workers 8 --compare
//! parsum --generate 10000 --max-cols 256 --dispatch pool -v
//! ```

use std::path::{Path, PathBuf};

use clap::{ArgAction, ArgGroup, Parser};

use crate::error::{ParsumError, Result};
use crate::io::InputFormat;
use crate::model::Dispatch;

/// Where the matrix comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixSource<'a> {
    File(&'a Path),
    Generated {
        rows: usize,
        max_cols: usize,
        seed: u64,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "parsum", version, about = "Sum a matrix with a fixed number of parallel chunk workers")]
#[command(group(ArgGroup::new("source").required(true).args(["input", "generate"])))]
pub struct Config {
    /// Matrix file (text or JSON); `-` reads stdin
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Generate a random ragged matrix with this many rows instead of reading one
    #[arg(long, value_name = "ROWS")]
    pub generate: Option<usize>,

    /// Maximum row length for generated matrices
    #[arg(long, default_value_t = 64)]
    pub max_cols: usize,

    /// Seed for generated matrices
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of workers (default: available CPUs)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// How chunk workers are executed
    #[arg(long, value_enum, default_value_t = Dispatch::Threads)]
    pub dispatch: Dispatch,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Also run the sequential sum and report the difference
    #[arg(long)]
    pub compare: bool,

    /// Report span timings on stderr
    #[arg(long)]
    pub profile: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parse from the process arguments and validate.
    pub fn parse_and_validate() -> Result<Self> {
        Self::parse().validated()
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let workers = self.workers();
        if workers < 1 {
            return Err(ParsumError::invalid_workers(workers));
        }
        match (&self.input, self.generate) {
            (Some(_), Some(_)) => {
                return Err(ParsumError::config("--input and --generate are exclusive"));
            }
            (None, None) => {
                return Err(ParsumError::config("one of --input or --generate is required"));
            }
            (Some(path), None) => {
                if path.as_os_str() != "-" && !path.exists() {
                    return Err(ParsumError::config(format!(
                        "Input file not found: {}",
                        path.display()
                    )));
                }
            }
            (None, Some(_)) => {}
        }
        Ok(())
    }

    /// Requested worker count, falling back to the available CPU count
    pub fn workers(&self) -> i64 {
        self.workers.unwrap_or_else(default_workers)
    }

    pub fn source(&self) -> MatrixSource<'_> {
        match (&self.input, self.generate) {
            (Some(path), _) => MatrixSource::File(path),
            (None, rows) => MatrixSource::Generated {
                rows: rows.unwrap_or(0),
                max_cols: self.max_cols,
                seed: self.seed,
            },
        }
    }
}

fn default_workers() -> i64 {
    std::thread::available_parallelism()
        .map(|n| i64::try_from(n.get()).unwrap_or(i64::MAX))
        .unwrap_or(1)
}
