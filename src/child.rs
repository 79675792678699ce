//! Child Bootstrapper (CB): runs exactly once, in the child process,
//! between `fork()` and `execve()`. Must not unwind back into the
//! parent's control flow — any failure here is reported directly and
//! the child exits immediately.
//!
//! Modeled on the fork/traceme/execve ordering shown by the ptrace
//! examples in the retrieved corpus: resource limits are installed
//! first (so the exec'd image inherits them), `PTRACE_TRACEME` second
//! (so the parent's first `waitpid` sees the exec-stop), `execve` last.

use crate::program::TracedProgram;
use crate::resource_limits;
use nix::sys::ptrace;
use nix::unistd::execv;
use std::ffi::CString;

/// Bootstraps the child side of the fork. Never returns: either
/// `execve` replaces the process image, or the process exits with `1`
/// after reporting why it could not.
///
/// # Safety
///
/// This function must be called only in the child immediately after
/// `fork()`. Like the fork-child examples it's modeled on, it avoids
/// anything beyond async-signal-safe operations and a final
/// `std::process::exit`, never unwinding back across the fork.
pub fn bootstrap_child(program: &TracedProgram) -> ! {
    if let Err(err) = resource_limits::apply(&program.limits) {
        crate::nurse_warn!("failed to apply resource limits in child: {}", err);
        std::process::exit(1);
    }

    if program.trace_enabled {
        if let Err(err) = ptrace::traceme() {
            crate::nurse_warn!("PTRACE_TRACEME failed: {}", err);
            std::process::exit(1);
        }
    }

    for (index, arg) in program.argv.iter().enumerate() {
        crate::nurse_debug!("argv[{}] = {:?}", index, arg);
    }

    let path: &CString = match program.argv.first() {
        Some(path) => path,
        None => {
            crate::nurse_warn!("child argv is empty");
            std::process::exit(1);
        }
    };

    match execv(path, &program.argv) {
        Ok(_) => unreachable!("execv only returns on error"),
        Err(err) => {
            crate::nurse_warn!("execve of {:?} failed: {}", path, err);
            std::process::exit(1);
        }
    }
}
