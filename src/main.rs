//! # Parsum: Partitioned Parallel Matrix Summation
//!
//! ## Usage
//! ```bash
//! # Sum a text matrix with 4 workers
//! parsum --input matrix.txt -n 4
//!
//! # Random 10k-row matrix, rayon pool dispatch, compare with sequential sum
//! parsum --generate 10000 --dispatch pool --compare
//!
//! # With span timings
//! parsum --input matrix.json --profile
//! ```

use anyhow::Context;
use tracing::Level;

use parsum::config::{Config, MatrixSource};
use parsum::SummationPipeline;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize the stderr tracing subscriber
fn init_tracing(verbose: u8, profile: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::fmt::format::FmtSpan;

    let mut level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    if profile {
        level = level.max(Level::INFO);
    }

    let builder = fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false);
    if profile {
        builder
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::uptime())
            .init();
    } else {
        builder.init();
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::parse_and_validate()?;
    init_tracing(config.verbose, config.profile);

    let pipeline = SummationPipeline::new(config);
    let matrix = pipeline.load_matrix().with_context(|| match pipeline.config().source() {
        MatrixSource::File(path) => format!("failed to load matrix from {}", path.display()),
        MatrixSource::Generated { rows, .. } => format!("failed to generate {} rows", rows),
    })?;
    let report = pipeline.run_on(&matrix)?;

    eprintln!("{}", report);
    println!("{}", report.total);

    Ok(())
}
