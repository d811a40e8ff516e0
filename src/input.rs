//! Parsing of typed coordinates for manual play.
//!
//! Accepts two non-negative integers separated by whitespace and/or a comma,
//! optionally wrapped in parentheses: `3 4`, `3,4`, `(3, 4)`. Bounds are not
//! checked here; the board rejects cells that are off the grid.

use thiserror::Error;

use crate::common::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("empty input")]
    Empty,
    #[error("expected a row and a column, e.g. `3 4`")]
    WrongArity,
    #[error("invalid number '{0}' - row and column must be non-negative integers")]
    InvalidNumber(String),
}

pub fn parse_coord(input: &str) -> Result<Coordinate, ParseCoordError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseCoordError::Empty);
    }
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Err(ParseCoordError::WrongArity);
    };
    let num = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| ParseCoordError::InvalidNumber(s.to_string()))
    };
    Ok(Coordinate::new(num(*row)?, num(*col)?))
}
