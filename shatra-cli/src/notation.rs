//! Move list notation
//!
//! Moves are whitespace- or comma-separated cell id pairs:
//! - `42-35`: capture reading preferred when a target is ambiguous
//! - `10/35`: ordinary reading preferred

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use shatra_core::CellId;

/// One move as typed by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveSpec {
    pub from: CellId,
    pub to: CellId,
    pub prefer_ordinary: bool,
}

impl FromStr for MoveSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (sep, prefer_ordinary) = if s.contains('/') { ('/', true) } else { ('-', false) };
        let Some((from, to)) = s.split_once(sep) else {
            bail!("expected FROM-TO or FROM/TO, got '{}'", s);
        };
        let from = from
            .trim()
            .parse()
            .with_context(|| format!("bad origin cell in '{}'", s))?;
        let to = to
            .trim()
            .parse()
            .with_context(|| format!("bad target cell in '{}'", s))?;
        Ok(MoveSpec { from, to, prefer_ordinary })
    }
}

impl fmt::Display for MoveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.prefer_ordinary { '/' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Parse a full move list; empty input yields no moves
pub fn parse_moves(input: &str) -> Result<Vec<MoveSpec>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| token.parse().with_context(|| format!("move #{}", i + 1)))
        .collect()
}
