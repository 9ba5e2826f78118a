//! Boundary scanning over token slices.
//!
//! The language has no statement terminators. Where a statement's expression ends is
//! decided by [`expression_end`], and block extents by depth counting over glyph
//! pairs. The loader and the executor both go through these functions.

use tracing::trace;

use crate::error::Fault;
use crate::token::{Glyph, Token};

/// Index one past the last token of the expression that starts at `from`.
///
/// Stops at the first token that starts a command, ends a block, or is immediately
/// followed by `≔` (it is then the target of the next assignment).
pub fn expression_end(tokens: &[Token], from: usize) -> usize {
  let mut end = from;

  while end < tokens.len() {
    let token = &tokens[end];
    if token.is_command_starter() || token.is_block_end() {
      break;
    }
    if tokens.get(end + 1).map_or(false, |next| next.is(Glyph::Assign)) {
      break;
    }
    end += 1;
  }

  trace!(from, end, "expression boundary");
  end
}

/// Index of the `end` glyph closing the `start` glyph at `from`.
pub fn matching_end(tokens: &[Token], from: usize, start: Glyph, end: Glyph) -> Result<usize, Fault> {
  let mut depth = 0usize;

  for (i, token) in tokens.iter().enumerate().skip(from) {
    if token.is(start) {
      depth += 1;
    } else if token.is(end) {
      // An unopened end before the block starts is not ours.
      if depth == 0 {
        continue;
      }
      depth -= 1;
      if depth == 0 {
        trace!(start = %start, at = i, "matched block end");
        return Ok(i);
      }
    }
  }

  Err(Fault::UnmatchedBlock { start, end })
}

fn nesting_delta(token: &Token) -> isize {
  match token.glyph() {
    Some(Glyph::FuncStart | Glyph::IfStart | Glyph::TryStart) => 1,
    Some(Glyph::FuncEnd | Glyph::IfEnd | Glyph::TryEnd) => -1,
    _ => 0,
  }
}

/// First `marker` in `tokens[from..to]` that is not inside a nested block.
pub fn find_clause(tokens: &[Token], from: usize, to: usize, marker: Glyph) -> Option<usize> {
  let mut depth = 0isize;

  for (i, token) in tokens.iter().enumerate().take(to).skip(from) {
    if depth == 0 && token.is(marker) {
      return Some(i);
    }
    depth += nesting_delta(token);
  }

  None
}
