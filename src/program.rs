//! The per-invocation state bundle threaded through fork → trace →
//! report (SPEC_FULL.md §3 "Traced-program record").

use crate::resource_limits::ResourceLimitEntry;
use nix::unistd::Pid;
use std::ffi::CString;

/// The two-state syscall-stop phase machine, made an explicit tagged
/// variant rather than a bare `bool` per the Design Notes guidance in
/// SPEC_FULL.md §9 ("make this a tagged variant with explicit
/// transitions rather than a free Boolean").
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CallPhase {
    Entry,
    Exit,
}

impl CallPhase {
    /// Toggles phase: every syscall-stop flips Entry ⇄ Exit.
    pub fn toggled(self) -> CallPhase {
        match self {
            CallPhase::Entry => CallPhase::Exit,
            CallPhase::Exit => CallPhase::Entry,
        }
    }
}

/// Final classification of the child's terminal wait status, produced
/// by the Exit Reporter.
#[derive(Copy, Clone, Debug)]
pub enum ExitClassification {
    Exited(i32),
    Signaled(nix::sys::signal::Signal),
    Stopped(nix::sys::signal::Signal),
}

pub struct TracedProgram {
    /// Child argv; `argv[0]` is the executable path.
    pub argv: Vec<CString>,
    /// The per-invocation Resource-Limit Table, mutated by the
    /// Argument Binder and applied (read-only) by the Child
    /// Bootstrapper.
    pub limits: Vec<ResourceLimitEntry>,
    /// Whether the syscall policy engine is active for this run.
    pub trace_enabled: bool,
    /// The child's process id, set once `fork()` returns in the
    /// parent.
    pub child_pid: Option<Pid>,
    /// Entry-vs-exit phase of the current syscall-stop pair. `None`
    /// before the first stop is observed.
    pub in_call: Option<CallPhase>,
    /// The most recent raw wait status observed for the child, kept
    /// around for diagnostics distinct from the terminal
    /// `final_status` classification below.
    pub last_status: Option<nix::sys::wait::WaitStatus>,
    /// Total number of syscall-stops observed so far (both entry and
    /// exit phases count).
    pub syscall_counter: u64,
    /// Whether normal-mode exit-code synthesis should instead
    /// propagate the child's own failure (`NURSE_HACK_REPORT_EXIT_FAIL`).
    pub report_child_failure: bool,
    /// The final classification, once known.
    pub final_status: Option<ExitClassification>,
}

impl TracedProgram {
    pub fn new(argv: Vec<CString>, limits: Vec<ResourceLimitEntry>) -> TracedProgram {
        TracedProgram {
            argv,
            limits,
            trace_enabled: false,
            child_pid: None,
            in_call: None,
            last_status: None,
            syscall_counter: 0,
            report_child_failure: false,
            final_status: None,
        }
    }
}
