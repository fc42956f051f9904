//! # I/O Module
//!
//! File reading boundaries. Converts on-disk matrix formats into the
//! in-memory [`Matrix`] representation.
//!
//! - `text`: one row per line, whitespace/comma separated
//! - `json`: array of arrays of numbers

pub mod json;
pub mod text;

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info_span;

use crate::data::Matrix;
use crate::error::Result;

pub use json::parse_json;
pub use text::parse_text;

/// Matrix file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// `.json` extension or a leading `[` means JSON, anything else is text
    #[default]
    Auto,
    Text,
    Json,
}

/// Read a matrix from `path`, or from stdin when `path` is `-`.
pub fn read_matrix(path: &Path, format: InputFormat) -> Result<Matrix> {
    let _span = info_span!("read_matrix", path = %path.display()).entered();

    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    let matrix = match resolve_format(format, path, &content) {
        InputFormat::Json => parse_json(&content)?,
        _ => parse_text(&content)?,
    };
    tracing::info!(
        rows = matrix.n_rows(),
        elements = matrix.n_elements(),
        "loaded matrix"
    );
    Ok(matrix)
}

/// Pick a concrete format. Never returns `Auto`.
pub fn resolve_format(format: InputFormat, path: &Path, content: &str) -> InputFormat {
    match format {
        InputFormat::Auto => {
            let json_ext = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if json_ext || content.trim_start().starts_with('[') {
                InputFormat::Json
            } else {
                InputFormat::Text
            }
        }
        explicit => explicit,
    }
}
