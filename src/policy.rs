//! Policy Loader (PL).
//!
//! Reads the syscall policy file, resets every populated Syscall
//! Registry slot to "deny" (`max_calls = 0`), then sets per-call
//! maxima for the entries named in the file. If the file can't be
//! opened, tracing is disabled for this run but resource limits still
//! apply (SPEC_FULL.md §4.2, §7 kind 4).

use crate::syscall_registry::SyscallRegistry;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_POLICY_PATH: &str = "/etc/nurse.conf";

/// Resolves the policy file path: the `PLIMIT_CONFIG_FILE` environment
/// override, else the fixed default.
pub fn policy_file_path() -> PathBuf {
    env::var_os("PLIMIT_CONFIG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_POLICY_PATH))
}

/// Loads the policy file at `path` into `registry`. Returns `true` if
/// tracing should stay enabled (the file was found and read), `false`
/// if tracing should be disabled for this run.
pub fn load_policy(registry: &mut SyscallRegistry, path: &Path) -> bool {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return false,
    };

    crate::nurse_debug!("opened syscall file \"{}\"", path.display());

    registry.reset_all_to_denied();

    for line in contents.lines() {
        if let Some((token, max_calls)) = parse_policy_line(line) {
            registry.set_max_calls(token, max_calls);
        }
    }

    true
}

/// Parses one `TOKEN WHITESPACE NUMBER` policy line. Blank and
/// malformed lines return `None` and are skipped without error,
/// matching the original's `fgets`/`sscanf` loop.
fn parse_policy_line(line: &str) -> Option<(&str, i64)> {
    let mut parts = line.trim_end().splitn(2, char::is_whitespace);
    let token = parts.next()?;
    let rest = parts.next()?.trim();
    if token.is_empty() || rest.is_empty() {
        return None;
    }
    rest.parse::<i64>().ok().map(|n| (token, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_well_formed_line() {
        assert_eq!(parse_policy_line("SYS_write 5"), Some(("SYS_write", 5)));
    }

    #[test]
    fn negative_maximum_means_unbounded() {
        assert_eq!(
            parse_policy_line("SYS_exit_group -1"),
            Some(("SYS_exit_group", -1))
        );
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        assert_eq!(parse_policy_line(""), None);
        assert_eq!(parse_policy_line("SYS_write"), None);
        assert_eq!(parse_policy_line("SYS_write notanumber"), None);
    }

    #[test]
    fn missing_file_disables_tracing_without_error() {
        let mut registry = SyscallRegistry::new();
        let enabled = load_policy(&mut registry, Path::new("/nonexistent/path/nurse.conf"));
        assert!(!enabled);
    }

    #[test]
    fn present_file_resets_then_applies_whitelist() {
        let mut registry = SyscallRegistry::new();
        registry.set_max_calls("SYS_read", 100);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SYS_write 0").unwrap();
        writeln!(file, "SYS_exit_group -1").unwrap();

        let enabled = load_policy(&mut registry, file.path());
        assert!(enabled);
        assert_eq!(registry.slot(libc::SYS_read).unwrap().max_calls, 0);
        assert_eq!(registry.slot(libc::SYS_write).unwrap().max_calls, 0);
        assert_eq!(registry.slot(libc::SYS_exit_group).unwrap().max_calls, -1);
    }

    #[test]
    fn env_override_takes_precedence_over_default() {
        env::set_var("PLIMIT_CONFIG_FILE", "/tmp/whatever-nurse-test.conf");
        assert_eq!(policy_file_path(), PathBuf::from("/tmp/whatever-nurse-test.conf"));
        env::remove_var("PLIMIT_CONFIG_FILE");
        assert_eq!(policy_file_path(), PathBuf::from(DEFAULT_POLICY_PATH));
    }
}
