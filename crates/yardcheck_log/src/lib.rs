//! Stderr logging for yardcheck runs.
//!
//! Progress lines (`phase_log!`, `phase_ok!`, `phase_warn!`) show unless the
//! run is quiet. `log_dbg!` and `log_trc!` need `-vv` and `-vvv`; `--debug`
//! implies `-vv`. `trace_dbg!` prints one checker component selected with
//! `--debug-trace` (or all of them under `--debug`).
//!
//! Stdout is left to problem listings and `--dump` tables.

pub use colored;

use yardcheck_config::{CheckerConfig, DebugTrace};

/// How chatty a message is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Phase,
  Debug,
  Trace,
}

/// `-v` count after `--quiet` and `--debug` are taken into account.
pub fn verbosity(config: &CheckerConfig) -> u8 {
  match (config.quiet, config.debug) {
    (true, _) => 0,
    (false, true) => config.verbose.max(2),
    (false, false) => config.verbose,
  }
}

pub fn enabled(
  config: &CheckerConfig,
  level: Level,
) -> bool {
  match level {
    Level::Phase => !config.quiet,
    Level::Debug => verbosity(config) >= 2,
    Level::Trace => verbosity(config) >= 3,
  }
}

pub fn trace_enabled(
  config: &CheckerConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

#[doc(hidden)]
#[macro_export]
macro_rules! __phase_line {
  ($config:expr, $prefix:literal, $color:ident, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Phase) {
      use $crate::colored::Colorize;
      eprintln!("{}{} {}", $prefix, "-->".$color().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// A step of the run, indented under the command's own output.
///
/// ```ignore
/// phase_log!(&config, "Checking... {}", path);
/// ```
#[macro_export]
macro_rules! phase_log {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::__phase_line!($config, "    ", bright_green, $fmt $(, $arg)*)
  };
}

/// The run finished cleanly.
#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::__phase_line!($config, "", bright_green, $fmt $(, $arg)*)
  };
}

/// The run finished with problems.
#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::__phase_line!($config, "", bright_yellow, $fmt $(, $arg)*)
  };
}

/// `debug[component]: ...` for one checker component.
///
/// ```ignore
/// trace_dbg!(&config, DebugTrace::Hierarchy, "lineage of {}: {:?}", name, lineage);
/// ```
#[macro_export]
macro_rules! trace_dbg {
  ($config:expr, $trace:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    let trace = $trace;
    if $crate::trace_enabled($config, trace) {
      eprintln!("debug[{}]: {}", trace.name(), format!($fmt $(, $arg)*));
    }
  }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __leveled_line {
  ($config:expr, $level:ident, $tag:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::$level) {
      eprintln!("{}: {}", $tag, format!($fmt $(, $arg)*));
    }
  }};
}

#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::__leveled_line!($config, Debug, "debug", $fmt $(, $arg)*)
  };
}

#[macro_export]
macro_rules! log_trc {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::__leveled_line!($config, Trace, "trace", $fmt $(, $arg)*)
  };
}
