//! Syscall Registry (SR).
//!
//! A static registry of known syscall numbers, indexed by number (the
//! array position equals the syscall number for every populated slot
//! — SPEC_FULL.md §3's consistency invariant). Each slot carries a
//! display name and the policy engine's per-call counters: `max_calls`
//! (set by the Policy Loader) and `observed_calls` (incremented by the
//! Tracer Engine, never decremented).
//!
//! Syscall numbers are taken from the `libc` crate's `SYS_*` constants
//! for the x86-64 ABI (see registers.rs for the ABI decision) rather
//! than hand-copied numbers, so the table tracks whatever Linux ABI
//! the `libc` crate was built against.

/// One entry of the syscall registry.
#[derive(Clone)]
pub struct SyscallSlot {
    pub number: i64,
    pub display_name: &'static str,
    pub max_calls: i64,
    pub observed_calls: u64,
}

/// The curated set of syscalls this supervisor knows how to name and
/// police. Not exhaustive — an unrecognized syscall number simply
/// falls through as an unnamed, unpoliced stop (SPEC_FULL.md §4.4
/// tie-break rule).
const CURATED: &[(i64, &str)] = &[
    (libc::SYS_read, "SYS_read"),
    (libc::SYS_write, "SYS_write"),
    (libc::SYS_open, "SYS_open"),
    (libc::SYS_close, "SYS_close"),
    (libc::SYS_stat, "SYS_stat"),
    (libc::SYS_fstat, "SYS_fstat"),
    (libc::SYS_lstat, "SYS_lstat"),
    (libc::SYS_poll, "SYS_poll"),
    (libc::SYS_lseek, "SYS_lseek"),
    (libc::SYS_mmap, "SYS_mmap"),
    (libc::SYS_mprotect, "SYS_mprotect"),
    (libc::SYS_munmap, "SYS_munmap"),
    (libc::SYS_brk, "SYS_brk"),
    (libc::SYS_rt_sigaction, "SYS_rt_sigaction"),
    (libc::SYS_rt_sigprocmask, "SYS_rt_sigprocmask"),
    (libc::SYS_rt_sigreturn, "SYS_rt_sigreturn"),
    (libc::SYS_ioctl, "SYS_ioctl"),
    (libc::SYS_pread64, "SYS_pread64"),
    (libc::SYS_pwrite64, "SYS_pwrite64"),
    (libc::SYS_readv, "SYS_readv"),
    (libc::SYS_writev, "SYS_writev"),
    (libc::SYS_access, "SYS_access"),
    (libc::SYS_pipe, "SYS_pipe"),
    (libc::SYS_select, "SYS_select"),
    (libc::SYS_sched_yield, "SYS_sched_yield"),
    (libc::SYS_mremap, "SYS_mremap"),
    (libc::SYS_msync, "SYS_msync"),
    (libc::SYS_madvise, "SYS_madvise"),
    (libc::SYS_dup, "SYS_dup"),
    (libc::SYS_dup2, "SYS_dup2"),
    (libc::SYS_pause, "SYS_pause"),
    (libc::SYS_nanosleep, "SYS_nanosleep"),
    (libc::SYS_getitimer, "SYS_getitimer"),
    (libc::SYS_alarm, "SYS_alarm"),
    (libc::SYS_setitimer, "SYS_setitimer"),
    (libc::SYS_getpid, "SYS_getpid"),
    (libc::SYS_sendfile, "SYS_sendfile"),
    (libc::SYS_socket, "SYS_socket"),
    (libc::SYS_connect, "SYS_connect"),
    (libc::SYS_accept, "SYS_accept"),
    (libc::SYS_sendto, "SYS_sendto"),
    (libc::SYS_recvfrom, "SYS_recvfrom"),
    (libc::SYS_sendmsg, "SYS_sendmsg"),
    (libc::SYS_recvmsg, "SYS_recvmsg"),
    (libc::SYS_shutdown, "SYS_shutdown"),
    (libc::SYS_bind, "SYS_bind"),
    (libc::SYS_listen, "SYS_listen"),
    (libc::SYS_clone, "SYS_clone"),
    (libc::SYS_fork, "SYS_fork"),
    (libc::SYS_vfork, "SYS_vfork"),
    (libc::SYS_execve, "SYS_execve"),
    (libc::SYS_exit, "SYS_exit"),
    (libc::SYS_wait4, "SYS_wait4"),
    (libc::SYS_kill, "SYS_kill"),
    (libc::SYS_uname, "SYS_uname"),
    (libc::SYS_fcntl, "SYS_fcntl"),
    (libc::SYS_flock, "SYS_flock"),
    (libc::SYS_fsync, "SYS_fsync"),
    (libc::SYS_fdatasync, "SYS_fdatasync"),
    (libc::SYS_truncate, "SYS_truncate"),
    (libc::SYS_ftruncate, "SYS_ftruncate"),
    (libc::SYS_getdents, "SYS_getdents"),
    (libc::SYS_getcwd, "SYS_getcwd"),
    (libc::SYS_chdir, "SYS_chdir"),
    (libc::SYS_fchdir, "SYS_fchdir"),
    (libc::SYS_rename, "SYS_rename"),
    (libc::SYS_mkdir, "SYS_mkdir"),
    (libc::SYS_rmdir, "SYS_rmdir"),
    (libc::SYS_creat, "SYS_creat"),
    (libc::SYS_link, "SYS_link"),
    (libc::SYS_unlink, "SYS_unlink"),
    (libc::SYS_symlink, "SYS_symlink"),
    (libc::SYS_readlink, "SYS_readlink"),
    (libc::SYS_chmod, "SYS_chmod"),
    (libc::SYS_fchmod, "SYS_fchmod"),
    (libc::SYS_chown, "SYS_chown"),
    (libc::SYS_fchown, "SYS_fchown"),
    (libc::SYS_lchown, "SYS_lchown"),
    (libc::SYS_umask, "SYS_umask"),
    (libc::SYS_gettimeofday, "SYS_gettimeofday"),
    (libc::SYS_getrlimit, "SYS_getrlimit"),
    (libc::SYS_getrusage, "SYS_getrusage"),
    (libc::SYS_sysinfo, "SYS_sysinfo"),
    (libc::SYS_times, "SYS_times"),
    (libc::SYS_ptrace, "SYS_ptrace"),
    (libc::SYS_getuid, "SYS_getuid"),
    (libc::SYS_getgid, "SYS_getgid"),
    (libc::SYS_setuid, "SYS_setuid"),
    (libc::SYS_setgid, "SYS_setgid"),
    (libc::SYS_geteuid, "SYS_geteuid"),
    (libc::SYS_getegid, "SYS_getegid"),
    (libc::SYS_setpgid, "SYS_setpgid"),
    (libc::SYS_getppid, "SYS_getppid"),
    (libc::SYS_setsid, "SYS_setsid"),
    (libc::SYS_getpgid, "SYS_getpgid"),
    (libc::SYS_getsid, "SYS_getsid"),
    (libc::SYS_rt_sigpending, "SYS_rt_sigpending"),
    (libc::SYS_rt_sigsuspend, "SYS_rt_sigsuspend"),
    (libc::SYS_sigaltstack, "SYS_sigaltstack"),
    (libc::SYS_statfs, "SYS_statfs"),
    (libc::SYS_fstatfs, "SYS_fstatfs"),
    (libc::SYS_getpriority, "SYS_getpriority"),
    (libc::SYS_setpriority, "SYS_setpriority"),
    (libc::SYS_mlock, "SYS_mlock"),
    (libc::SYS_munlock, "SYS_munlock"),
    (libc::SYS_mlockall, "SYS_mlockall"),
    (libc::SYS_munlockall, "SYS_munlockall"),
    (libc::SYS_prctl, "SYS_prctl"),
    (libc::SYS_arch_prctl, "SYS_arch_prctl"),
    (libc::SYS_setrlimit, "SYS_setrlimit"),
    (libc::SYS_chroot, "SYS_chroot"),
    (libc::SYS_sync, "SYS_sync"),
    (libc::SYS_mount, "SYS_mount"),
    (libc::SYS_umount2, "SYS_umount2"),
    (libc::SYS_reboot, "SYS_reboot"),
    (libc::SYS_sethostname, "SYS_sethostname"),
    (libc::SYS_gettid, "SYS_gettid"),
    (libc::SYS_readahead, "SYS_readahead"),
    (libc::SYS_setxattr, "SYS_setxattr"),
    (libc::SYS_getxattr, "SYS_getxattr"),
    (libc::SYS_listxattr, "SYS_listxattr"),
    (libc::SYS_removexattr, "SYS_removexattr"),
    (libc::SYS_tkill, "SYS_tkill"),
    (libc::SYS_time, "SYS_time"),
    (libc::SYS_futex, "SYS_futex"),
    (libc::SYS_sched_setaffinity, "SYS_sched_setaffinity"),
    (libc::SYS_sched_getaffinity, "SYS_sched_getaffinity"),
    (libc::SYS_getdents64, "SYS_getdents64"),
    (libc::SYS_set_tid_address, "SYS_set_tid_address"),
    (libc::SYS_restart_syscall, "SYS_restart_syscall"),
    (libc::SYS_fadvise64, "SYS_fadvise64"),
    (libc::SYS_clock_gettime, "SYS_clock_gettime"),
    (libc::SYS_clock_getres, "SYS_clock_getres"),
    (libc::SYS_clock_nanosleep, "SYS_clock_nanosleep"),
    (libc::SYS_exit_group, "SYS_exit_group"),
    (libc::SYS_epoll_wait, "SYS_epoll_wait"),
    (libc::SYS_epoll_ctl, "SYS_epoll_ctl"),
    (libc::SYS_tgkill, "SYS_tgkill"),
    (libc::SYS_utimes, "SYS_utimes"),
    (libc::SYS_waitid, "SYS_waitid"),
    (libc::SYS_openat, "SYS_openat"),
    (libc::SYS_mkdirat, "SYS_mkdirat"),
    (libc::SYS_fchownat, "SYS_fchownat"),
    (libc::SYS_newfstatat, "SYS_newfstatat"),
    (libc::SYS_unlinkat, "SYS_unlinkat"),
    (libc::SYS_renameat, "SYS_renameat"),
    (libc::SYS_linkat, "SYS_linkat"),
    (libc::SYS_symlinkat, "SYS_symlinkat"),
    (libc::SYS_readlinkat, "SYS_readlinkat"),
    (libc::SYS_fchmodat, "SYS_fchmodat"),
    (libc::SYS_faccessat, "SYS_faccessat"),
    (libc::SYS_pselect6, "SYS_pselect6"),
    (libc::SYS_ppoll, "SYS_ppoll"),
    (libc::SYS_unshare, "SYS_unshare"),
    (libc::SYS_splice, "SYS_splice"),
    (libc::SYS_tee, "SYS_tee"),
    (libc::SYS_utimensat, "SYS_utimensat"),
    (libc::SYS_epoll_pwait, "SYS_epoll_pwait"),
    (libc::SYS_signalfd, "SYS_signalfd"),
    (libc::SYS_timerfd_create, "SYS_timerfd_create"),
    (libc::SYS_eventfd, "SYS_eventfd"),
    (libc::SYS_fallocate, "SYS_fallocate"),
    (libc::SYS_accept4, "SYS_accept4"),
    (libc::SYS_eventfd2, "SYS_eventfd2"),
    (libc::SYS_epoll_create1, "SYS_epoll_create1"),
    (libc::SYS_dup3, "SYS_dup3"),
    (libc::SYS_pipe2, "SYS_pipe2"),
    (libc::SYS_preadv, "SYS_preadv"),
    (libc::SYS_pwritev, "SYS_pwritev"),
    (libc::SYS_prlimit64, "SYS_prlimit64"),
    (libc::SYS_getrandom, "SYS_getrandom"),
    (libc::SYS_memfd_create, "SYS_memfd_create"),
];

/// The Syscall Registry: a per-invocation, array-indexed table of
/// known syscalls and their policy state.
pub struct SyscallRegistry {
    slots: Vec<Option<SyscallSlot>>,
}

impl SyscallRegistry {
    /// Builds a fresh registry from the curated syscall list, with
    /// every `max_calls` and `observed_calls` starting at zero.
    pub fn new() -> SyscallRegistry {
        let highest = CURATED.iter().map(|(n, _)| *n).max().unwrap_or(0);
        let mut slots: Vec<Option<SyscallSlot>> = (0..=highest).map(|_| None).collect();
        for &(number, display_name) in CURATED {
            slots[number as usize] = Some(SyscallSlot {
                number,
                display_name,
                max_calls: 0,
                observed_calls: 0,
            });
        }
        SyscallRegistry { slots }
    }

    /// Verifies that every populated slot's stored syscall number
    /// equals its index, per SPEC_FULL.md §3/§4.8/§8. Returns the
    /// offending index on mismatch.
    pub fn check_consistency(&self) -> Result<(), (usize, i64)> {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot {
                if slot.number as usize != index {
                    return Err((index, slot.number));
                }
            }
        }
        Ok(())
    }

    /// Resets every populated slot to `max_calls = 0, observed_calls =
    /// 0` — the whitelist-by-default regime the Policy Loader
    /// establishes before reading the policy file (SPEC_FULL.md §4.2).
    pub fn reset_all_to_denied(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.max_calls = 0;
            slot.observed_calls = 0;
        }
    }

    /// Sets `max_calls` for the slot whose display name matches
    /// `display_name`, if any. Used by the Policy Loader; silently a
    /// no-op for unrecognized names (SPEC_FULL.md §4.2).
    pub fn set_max_calls(&mut self, display_name: &str, max_calls: i64) {
        for slot in self.slots.iter_mut().flatten() {
            if slot.display_name == display_name {
                slot.max_calls = max_calls;
            }
        }
    }

    /// Looks up the slot for `syscall_number`, if it is both in bounds
    /// and populated. Out-of-range or unpopulated numbers are the
    /// "unnamed, unpoliced" tie-break case from SPEC_FULL.md §4.4.
    pub fn slot(&self, syscall_number: i64) -> Option<&SyscallSlot> {
        if syscall_number < 0 {
            return None;
        }
        self.slots.get(syscall_number as usize)?.as_ref()
    }

    /// Increments `observed_calls` for `syscall_number` and returns the
    /// updated slot, if the number is known. `observed_calls` is
    /// monotone non-decreasing across a run (SPEC_FULL.md §8).
    pub fn record_call(&mut self, syscall_number: i64) -> Option<&SyscallSlot> {
        if syscall_number < 0 {
            return None;
        }
        let slot = self.slots.get_mut(syscall_number as usize)?.as_mut()?;
        slot.observed_calls += 1;
        Some(slot)
    }
}

impl Default for SyscallRegistry {
    fn default() -> Self {
        SyscallRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_holds_for_fresh_registry() {
        let registry = SyscallRegistry::new();
        assert!(registry.check_consistency().is_ok());
    }

    #[test]
    fn write_slot_is_indexed_by_its_own_number() {
        let registry = SyscallRegistry::new();
        let slot = registry.slot(libc::SYS_write).expect("SYS_write must be registered");
        assert_eq!(slot.display_name, "SYS_write");
        assert_eq!(slot.number, libc::SYS_write);
    }

    #[test]
    fn reset_then_whitelist_blocks_everything_but_named_calls() {
        let mut registry = SyscallRegistry::new();
        registry.set_max_calls("SYS_write", 5);
        registry.reset_all_to_denied();
        // reset runs before the whitelist is applied by the real Policy
        // Loader; simulate that ordering here.
        registry.set_max_calls("SYS_write", 5);

        assert_eq!(registry.slot(libc::SYS_write).unwrap().max_calls, 5);
        assert_eq!(registry.slot(libc::SYS_read).unwrap().max_calls, 0);
    }

    #[test]
    fn record_call_increments_observed_and_never_decreases() {
        let mut registry = SyscallRegistry::new();
        registry.record_call(libc::SYS_open);
        registry.record_call(libc::SYS_open);
        assert_eq!(registry.slot(libc::SYS_open).unwrap().observed_calls, 2);
    }

    #[test]
    fn unknown_number_is_not_tracked() {
        let mut registry = SyscallRegistry::new();
        assert!(registry.slot(i64::MAX).is_none());
        assert!(registry.record_call(i64::MAX).is_none());
    }
}
