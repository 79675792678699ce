//! Exit Reporter (ER): turns the child's terminal wait status into the
//! supervisor's own process exit code (SPEC_FULL.md §4.7, §6).

use crate::program::{ExitClassification, TracedProgram};
use crate::signal_catalog::signal_string;

/// Classifies `program.final_status` and logs a human-readable summary,
/// returning the exit code `nurse` itself should exit with.
///
/// In normal mode the supervisor always reports success (`0`) once it
/// has successfully run the child to completion, regardless of how the
/// child ended — the supervisor's job was to enforce limits, not to
/// mirror the child's outcome. When `report_child_failure` is set
/// (`NURSE_HACK_REPORT_EXIT_FAIL`), a non-zero or signaled child result
/// is instead propagated as the supervisor's own exit code `1`.
pub fn classify_and_report(program: &TracedProgram) -> i32 {
    let classification = program
        .final_status
        .expect("final_status set before the tracer loop returns");

    let child_failed = match classification {
        ExitClassification::Exited(code) => {
            crate::nurse_debug!("child exited with status {}", code);
            code != 0
        }
        ExitClassification::Signaled(signal) => {
            crate::nurse_warn!(
                "child terminated by signal {} ({})",
                signal,
                signal_string(signal)
            );
            true
        }
        ExitClassification::Stopped(signal) => {
            crate::nurse_debug!("child stopped on {} ({})", signal, signal_string(signal));
            false
        }
    };

    if program.report_child_failure && child_failed {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_limits::new_catalog;
    use nix::sys::signal::Signal;
    use std::ffi::CString;

    fn program_with(status: ExitClassification, report_child_failure: bool) -> TracedProgram {
        let mut program =
            TracedProgram::new(vec![CString::new("/bin/true").unwrap()], new_catalog());
        program.final_status = Some(status);
        program.report_child_failure = report_child_failure;
        program
    }

    #[test]
    fn normal_mode_ignores_child_failure() {
        let program = program_with(ExitClassification::Exited(1), false);
        assert_eq!(classify_and_report(&program), 0);
    }

    #[test]
    fn propagate_mode_surfaces_nonzero_exit() {
        let program = program_with(ExitClassification::Exited(1), true);
        assert_eq!(classify_and_report(&program), 1);
    }

    #[test]
    fn propagate_mode_surfaces_signal_death() {
        let program = program_with(ExitClassification::Signaled(Signal::SIGSEGV), true);
        assert_eq!(classify_and_report(&program), 1);
    }

    #[test]
    fn clean_exit_is_always_zero() {
        let program = program_with(ExitClassification::Exited(0), true);
        assert_eq!(classify_and_report(&program), 0);
    }
}
