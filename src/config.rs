pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Emit trace lines for every interpreter decision.
  pub debug: bool,
  /// Nested calls allowed before a call fails with a depth error.
  pub max_call_depth: usize,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      debug: false,
      max_call_depth: DEFAULT_MAX_CALL_DEPTH,
    }
  }
}

impl Config {
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
    self.max_call_depth = max_call_depth;
    self
  }
}
