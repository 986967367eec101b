//! Identifier handling
//!
//! Volume and file identifiers are space padded. File identifiers on a
//! primary volume end in `;N`, and an extensionless name keeps its dot
//! (`NOEXT.;1`).

/// Identifier bytes as text, trailing padding removed
pub fn identifier_str(bytes: &[u8]) -> Result<&str, core::str::Utf8Error> {
    let end = bytes.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    core::str::from_utf8(&bytes[..end])
}

/// `README.TXT;1` becomes `README.TXT`, `NOEXT.;1` becomes `NOEXT`
pub fn strip_version(name: &str) -> &str {
    let base = match name.find(';') {
        Some(idx) => &name[..idx],
        None => name,
    };
    base.strip_suffix('.').unwrap_or(base)
}

/// Compare an on-disk identifier against a path component
pub fn names_match(on_disk: &str, wanted: &str) -> bool {
    strip_version(on_disk).eq_ignore_ascii_case(strip_version(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_version() {
        assert_eq!(strip_version("README.TXT;1"), "README.TXT");
        assert_eq!(strip_version("NOEXT.;1"), "NOEXT");
        assert_eq!(strip_version("BOOT"), "BOOT");
    }

    #[test]
    fn test_names_match_ignores_case_and_version() {
        assert!(names_match("README.TXT;1", "readme.txt"));
        assert!(names_match("Boot", "BOOT"));
        assert!(!names_match("README.TXT;1", "readme.md"));
    }

    #[test]
    fn test_trim_padding() {
        assert_eq!(identifier_str(b"KONSTRUCT   ").unwrap(), "KONSTRUCT");
        assert_eq!(identifier_str(b"    ").unwrap(), "");
    }
}
