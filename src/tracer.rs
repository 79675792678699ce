//! Tracer Engine (TE): the core syscall-stop loop.
//!
//! Shape follows the ptrace fork/traceme/waitpid loop pattern used by
//! the other userspace tracers in the retrieval pack (single child, no
//! clone/fork-event tracking — that is the follow-fork Non-goal from
//! SPEC_FULL.md §1). Each iteration resumes the child to its next
//! syscall-stop, reads its registers, advances the entry/exit phase,
//! and on entry checks the syscall against the policy, killing the
//! child on the first violation.

use crate::errors::NurseError;
use crate::format::printable_shot;
use crate::memory::read_child_cstring;
use crate::program::{CallPhase, TracedProgram};
use crate::registers::Registers;
use crate::syscall_registry::SyscallRegistry;
use nix::sys::ptrace;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

/// Longest argument string this engine will pull out of child memory
/// for a diagnostic shot.
const MAX_SHOT_LEN: usize = 64;

pub struct TracerEngine<'a> {
    registry: &'a mut SyscallRegistry,
}

impl<'a> TracerEngine<'a> {
    pub fn new(registry: &'a mut SyscallRegistry) -> TracerEngine<'a> {
        TracerEngine { registry }
    }

    /// Runs the syscall-stop loop to completion: the child either exits,
    /// is killed by a signal (delivered by itself or by us on policy
    /// violation), or stops on some other signal, which ends the loop
    /// rather than being forwarded. Returns once the child is no longer
    /// traceable; `program.final_status` holds the terminal
    /// classification.
    pub fn run(&mut self, program: &mut TracedProgram) -> Result<(), NurseError> {
        let pid = program.child_pid.expect("child_pid set before TE::run");

        loop {
            ptrace::syscall(pid, None).map_err(NurseError::Registers)?;

            let status = waitpid(pid, None).map_err(NurseError::Wait)?;
            program.last_status = Some(status);

            match status {
                WaitStatus::Exited(_, code) => {
                    program.final_status =
                        Some(crate::program::ExitClassification::Exited(code));
                    return Ok(());
                }
                WaitStatus::Signaled(_, signal, _) => {
                    program.final_status =
                        Some(crate::program::ExitClassification::Signaled(signal));
                    return Ok(());
                }
                WaitStatus::PtraceSyscall(_) | WaitStatus::Stopped(_, Signal::SIGTRAP) => {
                    self.handle_syscall_stop(pid, program)?;
                }
                WaitStatus::Stopped(_, signal) => {
                    // Any stop that isn't our syscall-trap marker ends
                    // the loop outright (SPEC_FULL.md §4.4 step 8); it
                    // is not ours to forward and resume.
                    program.final_status =
                        Some(crate::program::ExitClassification::Stopped(signal));
                    return Ok(());
                }
                other => {
                    crate::nurse_debug!("unhandled wait status {:?}", other);
                }
            }
        }
    }

    fn handle_syscall_stop(
        &mut self,
        pid: Pid,
        program: &mut TracedProgram,
    ) -> Result<(), NurseError> {
        let raw = ptrace::getregs(pid).map_err(NurseError::Registers)?;
        let regs = Registers::from_raw(raw);

        let phase = program.in_call.map(CallPhase::toggled).unwrap_or(CallPhase::Entry);
        program.in_call = Some(phase);
        program.syscall_counter += 1;

        let number = regs.syscall_number();

        // SYS_exit/SYS_exit_group never reach their own exit-phase
        // stop: the next event is the process's real termination.
        // Skipping the policy accounting here avoids double-counting
        // a call whose exit we'll never observe.
        if number == libc::SYS_exit || number == libc::SYS_exit_group {
            return Ok(());
        }

        match phase {
            CallPhase::Entry => self.check_policy_on_entry(pid, &regs, program),
            CallPhase::Exit => {
                crate::nurse_debug!(
                    "syscall {} returned {}",
                    number,
                    regs.return_value()
                );
                Ok(())
            }
        }
    }

    fn check_policy_on_entry(
        &mut self,
        pid: Pid,
        regs: &Registers,
        program: &mut TracedProgram,
    ) -> Result<(), NurseError> {
        let number = regs.syscall_number();

        if number == libc::SYS_open || number == libc::SYS_openat {
            let path_position = if number == libc::SYS_openat { 2 } else { 1 };
            if let Ok(bytes) = read_child_cstring(pid, regs.arg(path_position), MAX_SHOT_LEN) {
                crate::nurse_debug!("open(\"{}\")", printable_shot(&bytes, MAX_SHOT_LEN));
            }
        } else if number == libc::SYS_write {
            if let Ok(bytes) = read_child_cstring(pid, regs.arg(2), MAX_SHOT_LEN) {
                crate::nurse_debug!("write(\"{}\")", printable_shot(&bytes, MAX_SHOT_LEN));
            }
        }

        let slot = match self.registry.record_call(number) {
            Some(slot) => slot,
            None => return Ok(()), // unnamed, unpoliced: the §4.4 tie-break
        };

        let violated = slot.max_calls >= 0 && slot.observed_calls as i64 > slot.max_calls;
        if violated {
            crate::nurse_warn!(
                "policy violation: {} exceeded {} calls, killing child",
                slot.display_name,
                slot.max_calls
            );
            ptrace::kill(pid).map_err(NurseError::Registers)?;
        }
        Ok(())
    }
}
