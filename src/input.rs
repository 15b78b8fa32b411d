//! Operator input normalization: id lists and threshold lines.

use thiserror::Error;

use crate::subjects::ThresholdSeries;

/// Split a free-text line into subject ids.
///
/// Accepts comma or whitespace separators and uppercases each token, so
/// "ii-1 , ii-2" becomes ["II-1", "II-2"]. Idempotent on already-normalized
/// input.
pub fn normalize_ids(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdParseError {
    #[error("expected exactly {expected} values, got {got}", expected = ThresholdSeries::LEN)]
    WrongCount { got: usize },
    #[error("not a number: \"{0}\"")]
    NotANumber(String),
}

/// Parse one threshold line: exactly six numbers, comma- or space-separated.
pub fn parse_thresholds(raw: &str) -> Result<ThresholdSeries, ThresholdParseError> {
    let tokens: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != ThresholdSeries::LEN {
        return Err(ThresholdParseError::WrongCount { got: tokens.len() });
    }

    let mut values = [0.0f32; ThresholdSeries::LEN];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token
            .parse()
            .map_err(|_| ThresholdParseError::NotANumber((*token).to_string()))?;
    }
    Ok(ThresholdSeries::new(values))
}
