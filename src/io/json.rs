//! # JSON Matrix Format
//!
//! An array of arrays of numbers, e.g. `[[1, 2, 3], [4.5]]`. JSON has no
//! spelling for NaN or infinities; use the text format for those.

use crate::data::Matrix;
use crate::error::Result;

pub fn parse_json(input: &str) -> Result<Matrix> {
    Ok(serde_json::from_str(input)?)
}
