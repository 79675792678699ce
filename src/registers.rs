//! A small capability over the raw ptrace register snapshot.
//!
//! The rest of the tracer never touches `libc::user_regs_struct`
//! directly; it only asks for `syscall_number()`, `arg(i)` and
//! `return_value()`. Confining the concrete register names here is
//! what lets the ABI assumption documented in SPEC_FULL.md §1 stay a
//! one-module concern instead of leaking through the tracer engine.

use libc::user_regs_struct;

/// A general-purpose register snapshot captured at a single
/// syscall-stop. Not persisted across stops.
#[derive(Copy, Clone)]
pub struct Registers {
    raw: user_regs_struct,
}

impl Registers {
    pub fn from_raw(raw: user_regs_struct) -> Registers {
        Registers { raw }
    }

    /// The syscall number, read from the "original syscall number"
    /// register (`orig_rax` on x86-64). Valid at both entry and exit.
    pub fn syscall_number(&self) -> i64 {
        self.raw.orig_rax as i64
    }

    /// Argument registers 1..=3, in the ABI's calling-convention order
    /// (`rdi`, `rsi`, `rdx` on x86-64). Only the first three are ever
    /// needed: the policy engine only inspects `open`'s path argument
    /// (position 1) and `write`'s buffer/length arguments (positions 2
    /// and 3).
    pub fn arg(&self, position: u8) -> u64 {
        match position {
            1 => self.raw.rdi,
            2 => self.raw.rsi,
            3 => self.raw.rdx,
            _ => panic!("unsupported argument position {}", position),
        }
    }

    /// The return-value register (`rax`), valid only at the exit phase
    /// of a syscall-stop.
    pub fn return_value(&self) -> i64 {
        self.raw.rax as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regs_with(orig_rax: u64, rdi: u64, rsi: u64, rdx: u64, rax: u64) -> Registers {
        let mut raw: user_regs_struct = unsafe { std::mem::zeroed() };
        raw.orig_rax = orig_rax;
        raw.rdi = rdi;
        raw.rsi = rsi;
        raw.rdx = rdx;
        raw.rax = rax;
        Registers::from_raw(raw)
    }

    #[test]
    fn reads_syscall_number_and_args() {
        let r = regs_with(1, 0x10, 0x20, 0x30, 0xffffffffffffffff);
        assert_eq!(r.syscall_number(), 1);
        assert_eq!(r.arg(1), 0x10);
        assert_eq!(r.arg(2), 0x20);
        assert_eq!(r.arg(3), 0x30);
        assert_eq!(r.return_value(), -1);
    }

    #[test]
    #[should_panic]
    fn arg_position_out_of_range_panics() {
        let r = regs_with(0, 0, 0, 0, 0);
        r.arg(4);
    }
}
