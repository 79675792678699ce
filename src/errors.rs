//! Error types for the supervisor.
//!
//! Most error kinds here map directly onto one of the exit codes in
//! SPEC_FULL.md §6; `main` does that mapping in one place via
//! `NurseError::exit_code`, rather than scattering `process::exit`
//! calls through the component modules.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NurseError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("syscall registry inconsistent at index {index}: stored number {stored}")]
    RegistryInconsistent { index: usize, stored: i64 },

    #[error("failed to install teardown hook")]
    TeardownHookInstall,

    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("ptrace register read failed: {0}")]
    Registers(#[source] nix::Error),

    #[error("child memory read failed at {addr:#x}: {source}")]
    ChildMemory {
        addr: usize,
        #[source]
        source: nix::Error,
    },

    #[error("wait() on child failed: {0}")]
    Wait(#[source] nix::Error),
}

impl NurseError {
    /// The supervisor exit code this error maps to, per SPEC_FULL.md §6.
    pub fn exit_code(&self) -> i32 {
        match self {
            NurseError::Usage(_) => 1,
            NurseError::RegistryInconsistent { .. } => 38,
            NurseError::TeardownHookInstall => 39,
            NurseError::Fork(_)
            | NurseError::Registers(_)
            | NurseError::ChildMemory { .. }
            | NurseError::Wait(_) => 1,
        }
    }
}
