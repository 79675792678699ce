//! A tiny leveled-logging facade for the fixed-marker diagnostic stream.
//!
//! SPEC_FULL.md §4.9 / §7 pin every supervisor diagnostic to a fixed
//! line prefix so an external log scraper can tell supervisor output
//! from the traced child's own stdout/stderr. That contract is more
//! specific than what a generic facade like `log` or `tracing` gives
//! you for free, so this crate grows its own small macro, the same way
//! the donor codebase (`rd`) reaches for its own `log!`/`LogLevel`
//! machinery instead of an external logging crate.

use std::io::Write;

/// Fixed marker every supervisor diagnostic line starts with.
pub const NURSE_HEAD: &str = "==NURSE== ";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Debug,
    Warn,
}

/// Writes one marker-prefixed line to the debug stream (stderr).
pub fn write_line(level: LogLevel, args: std::fmt::Arguments) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let tag = match level {
        LogLevel::Debug => "",
        LogLevel::Warn => "WARNING: ",
    };
    let _ = write!(handle, "{}{}{}\n", NURSE_HEAD, tag, args);
    let _ = handle.flush();
}

#[macro_export]
macro_rules! nurse_debug {
    ($($arg:tt)*) => {
        $crate::log::write_line($crate::log::LogLevel::Debug, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! nurse_warn {
    ($($arg:tt)*) => {
        $crate::log::write_line($crate::log::LogLevel::Warn, format_args!($($arg)*))
    };
}
