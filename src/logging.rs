use std::fmt;
use std::sync::Once;

use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Wall-clock timestamps for trace lines.
struct LocalTime;

impl FormatTime for LocalTime {
  fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
    write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
  }
}

/// Installs the trace subscriber once per process. With `debug` every interpreter
/// decision is traced; otherwise `RUST_LOG` decides, defaulting to warnings only.
pub fn init(debug: bool) {
  TRACING_INIT.call_once(|| {
    let filter = if debug {
      EnvFilter::new("obscurix=debug")
    } else {
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_timer(LocalTime)
      .with_target(false)
      .with_writer(std::io::stderr)
      .try_init();
  });
}
