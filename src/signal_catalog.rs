//! Signal Catalog (SC): a static, read-only mapping from signal number
//! to a short human diagnostic, used by the Exit Reporter when the
//! child dies by or stops on a signal.

use nix::sys::signal::Signal;

struct SignalEntry {
    signal: Signal,
    diagnostic: &'static str,
}

const CATALOG: &[SignalEntry] = &[
    entry(Signal::SIGHUP, "hang up"),
    entry(Signal::SIGINT, "keyboard interrupt"),
    entry(Signal::SIGQUIT, "keyboard quit"),
    entry(Signal::SIGILL, "illegal instruction"),
    entry(Signal::SIGTRAP, "breakpoint"),
    entry(Signal::SIGABRT, "abort"),
    entry(Signal::SIGFPE, "floating point exception"),
    entry(Signal::SIGKILL, "killed"),
    entry(Signal::SIGUSR1, "user-defined signal 1"),
    entry(Signal::SIGUSR2, "user-defined signal 2"),
    entry(Signal::SIGSEGV, "segmentation fault"),
    entry(Signal::SIGPIPE, "broken pipe"),
    entry(Signal::SIGALRM, "alarm"),
    entry(Signal::SIGTERM, "terminated"),
    entry(Signal::SIGCHLD, "child stopped"),
    entry(Signal::SIGSTOP, "stopped"),
    entry(Signal::SIGCONT, "continue"),
    entry(Signal::SIGBUS, "bus error"),
    entry(Signal::SIGXCPU, "cpu time limit exceeded"),
    entry(Signal::SIGXFSZ, "file size limit exceeded"),
];

const fn entry(signal: Signal, diagnostic: &'static str) -> SignalEntry {
    SignalEntry { signal, diagnostic }
}

/// Returns a short diagnostic string for `signal`, or a generic
/// fallback for signals outside the catalog (real-time signals and
/// anything not covered by the original program's table).
pub fn signal_string(signal: Signal) -> &'static str {
    CATALOG
        .iter()
        .find(|e| e.signal == signal)
        .map(|e| e.diagnostic)
        .unwrap_or("unrecognized signal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_signal_has_diagnostic() {
        assert_eq!(signal_string(Signal::SIGSEGV), "segmentation fault");
        assert_eq!(signal_string(Signal::SIGKILL), "killed");
    }

    #[test]
    fn unknown_signal_falls_back() {
        assert_eq!(signal_string(Signal::SIGWINCH), "unrecognized signal");
    }
}
