//! Hostname syntax checks
//!
//! A device hostname is a single DNS label: ASCII letters, digits and
//! hyphens, 1 to 63 bytes, never starting or ending with a hyphen.

use thiserror::Error;

/// Maximum length of a single DNS label (RFC 1035)
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("hostname is empty")]
    Empty,

    #[error("hostname is {len} bytes, at most 63 allowed")]
    TooLong { len: usize },

    #[error("hostname must not start with '-'")]
    LeadingHyphen,

    #[error("hostname must not end with '-'")]
    TrailingHyphen,

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// `const` form of [`check_hostname`], used to reject bad build-time values.
pub const fn is_valid_hostname(name: &str) -> bool {
    let bytes = name.as_bytes();
    let len = bytes.len();
    if len == 0 || len > MAX_LABEL_LEN {
        return false;
    }
    if bytes[0] == b'-' || bytes[len - 1] == b'-' {
        return false;
    }

    let mut i = 0;
    while i < len {
        let b = bytes[i];
        if !(b.is_ascii_alphanumeric() || b == b'-') {
            return false;
        }
        i += 1;
    }
    true
}

/// Checks `name` and reports the first rule it breaks.
pub fn check_hostname(name: &str) -> Result<(), HostnameError> {
    if name.is_empty() {
        return Err(HostnameError::Empty);
    }
    if name.len() > MAX_LABEL_LEN {
        return Err(HostnameError::TooLong { len: name.len() });
    }
    if name.starts_with('-') {
        return Err(HostnameError::LeadingHyphen);
    }
    if name.ends_with('-') {
        return Err(HostnameError::TrailingHyphen);
    }
    if let Some((position, ch)) = name
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(HostnameError::InvalidCharacter { ch, position });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_labels() {
        for name in ["braccio1", "a", "arm-2", "ARM", "x1-y2-z3"] {
            assert!(check_hostname(name).is_ok(), "{name}");
            assert!(is_valid_hostname(name), "{name}");
        }
        let longest = "a".repeat(MAX_LABEL_LEN);
        assert!(check_hostname(&longest).is_ok());
    }

    #[test]
    fn test_rejects_invalid_labels() {
        assert_eq!(check_hostname(""), Err(HostnameError::Empty));
        assert_eq!(check_hostname("-arm"), Err(HostnameError::LeadingHyphen));
        assert_eq!(check_hostname("arm-"), Err(HostnameError::TrailingHyphen));
        assert_eq!(
            check_hostname("braccio_1"),
            Err(HostnameError::InvalidCharacter { ch: '_', position: 7 })
        );
        assert_eq!(
            check_hostname("arm.local"),
            Err(HostnameError::InvalidCharacter { ch: '.', position: 3 })
        );
        assert_eq!(
            check_hostname(&"a".repeat(64)),
            Err(HostnameError::TooLong { len: 64 })
        );
    }

    #[test]
    fn test_const_and_runtime_checks_agree() {
        for name in ["braccio1", "", "-x", "x-", "ü", "a b", "<YOUR-SSID>"] {
            assert_eq!(is_valid_hostname(name), check_hostname(name).is_ok(), "{name}");
        }
    }
}
