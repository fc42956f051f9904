//! # Text Matrix Format
//!
//! One row per line. Values are separated by whitespace and/or commas.
//! Blank lines and lines starting with `#` are skipped. Tokens use Rust
//! float syntax, so `NaN`, `inf` and `-inf` are accepted.
//!
//! ```text
//! # 3 ragged rows
//! 1 2 3
//! 4, 5, 6
//! 7 8 9 10
//! ```

use crate::data::Matrix;
use crate::error::{ParsumError, Result};

pub fn parse_text(input: &str) -> Result<Matrix> {
    let mut matrix = Matrix::empty();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        matrix.push_row(parse_row(idx + 1, line)?);
    }
    Ok(matrix)
}

fn parse_row(line_num: usize, line: &str) -> Result<Vec<f64>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                ParsumError::parse(line_num, format!("invalid number '{}'", token))
            })
        })
        .collect()
}
