//! Printable-shot formatter: turns a raw byte buffer pulled from child
//! memory into a safe-to-log diagnostic string, escaping control
//! characters and replacing anything else non-printable with `.`
//! (SPEC_FULL.md §4.4, mirroring the original `stringshot`).

/// Formats `bytes` as a printable string, truncated to fit within
/// `max_len` characters (including any multi-character escapes).
pub fn printable_shot(bytes: &[u8], max_len: usize) -> String {
    let mut out = String::with_capacity(bytes.len().min(max_len));

    for &b in bytes {
        let piece: &str = match b {
            b'\n' => "\\n",
            b'\t' => "\\t",
            0 => "\\0",
            0x20..=0x7e => {
                out.push(b as char);
                continue;
            }
            _ => ".",
        };
        if out.len() + piece.len() > max_len {
            break;
        }
        out.push_str(piece);
    }

    if out.len() > max_len {
        out.truncate(max_len);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_ascii_passes_through_unchanged() {
        assert_eq!(printable_shot(b"hello", 64), "hello");
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(printable_shot(b"a\nb\tc\0d", 64), "a\\nb\\tc\\0d");
    }

    #[test]
    fn non_printable_bytes_become_dots() {
        assert_eq!(printable_shot(&[0x01, 0x02, b'x'], 64), "..x");
    }

    #[test]
    fn output_never_exceeds_max_len() {
        let shot = printable_shot(b"0123456789", 4);
        assert!(shot.len() <= 4);
    }

    #[test]
    fn reshotting_printable_ascii_is_idempotent() {
        let once = printable_shot(b"already printable text", 256);
        let twice = printable_shot(once.as_bytes(), 256);
        assert_eq!(once, twice);
    }
}
