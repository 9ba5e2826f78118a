//! Keeps deep recursion through nested blocks and calls from overflowing the native
//! stack before the call depth limit is reached.

/// Headroom that must remain before `f` runs.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving to a fresh stack segment when little space is left.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
  stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
