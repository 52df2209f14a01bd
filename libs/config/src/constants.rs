//! Build-time device constants
//!
//! The four values every consumer of the firmware image reads: WiFi
//! credentials, the advertised hostname and the HTTP server port. They are
//! plain `const` items, available from any thread with no initialization.
//!
//! Each value can be injected when the crate is compiled instead of being
//! hand-edited in source:
//!
//! ```text
//! BRACCIO_WLAN_SSID=workshop BRACCIO_WLAN_PASSWORD=hunter22 cargo build --release
//! ```
//!
//! Without those variables the placeholder literals below are compiled in,
//! and the validation layer reports the device as unconfigured.

use crate::hostname::is_valid_hostname;

/// Sentinel SSID compiled in when no network has been configured.
pub const PLACEHOLDER_SSID: &str = "<YOUR-SSID>";

/// Sentinel pre-shared key compiled in when no credential has been configured.
pub const PLACEHOLDER_PASSWORD: &str = "<YOUR-CREDENTIALS>";

/// WPA settings
pub const WLAN_SSID: &str = or_default(option_env!("BRACCIO_WLAN_SSID"), PLACEHOLDER_SSID);

/// Pre-shared key presented when joining
pub const WLAN_PASSWORD: &str =
    or_default(option_env!("BRACCIO_WLAN_PASSWORD"), PLACEHOLDER_PASSWORD);

/// Name the device advertises on the local network
pub const HOSTNAME: &str = or_default(option_env!("BRACCIO_HOSTNAME"), "braccio1");

/// TCP port of the HTTP server (80 = plain HTTP)
pub const HTTP_SERVER_PORT: u16 = match option_env!("BRACCIO_HTTP_SERVER_PORT") {
    Some(raw) => parse_port(raw),
    None => 80,
};

const _: () = assert!(
    is_valid_hostname(HOSTNAME),
    "BRACCIO_HOSTNAME is not a valid DNS label"
);

const fn or_default(injected: Option<&'static str>, fallback: &'static str) -> &'static str {
    match injected {
        Some(value) => value,
        None => fallback,
    }
}

/// Parses a decimal port at compile time. Any panic here is a build error.
const fn parse_port(raw: &str) -> u16 {
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        panic!("BRACCIO_HTTP_SERVER_PORT is empty");
    }

    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            panic!("BRACCIO_HTTP_SERVER_PORT must be decimal digits");
        }
        value = value * 10 + (b - b'0') as u32;
        if value > u16::MAX as u32 {
            panic!("BRACCIO_HTTP_SERVER_PORT exceeds 65535");
        }
        i += 1;
    }
    value as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_accepts_full_range() {
        assert_eq!(parse_port("0"), 0);
        assert_eq!(parse_port("80"), 80);
        assert_eq!(parse_port("08080"), 8080);
        assert_eq!(parse_port("65535"), u16::MAX);
    }

    #[test]
    #[should_panic(expected = "exceeds 65535")]
    fn test_parse_port_rejects_overflow() {
        parse_port("65536");
    }

    #[test]
    #[should_panic(expected = "decimal digits")]
    fn test_parse_port_rejects_garbage() {
        parse_port("80a");
    }

    #[test]
    fn test_compiled_hostname_is_a_dns_label() {
        assert!(is_valid_hostname(HOSTNAME));
    }

    #[test]
    fn test_constants_are_stable_across_reads() {
        let first = (WLAN_SSID, WLAN_PASSWORD, HOSTNAME, HTTP_SERVER_PORT);
        for _ in 0..3 {
            let again = (WLAN_SSID, WLAN_PASSWORD, HOSTNAME, HTTP_SERVER_PORT);
            assert_eq!(first, again);
            assert_eq!(first.0.as_bytes(), again.0.as_bytes());
        }
    }

    #[test]
    fn test_uninjected_build_uses_sentinels() {
        if option_env!("BRACCIO_WLAN_SSID").is_none() {
            assert_eq!(WLAN_SSID, PLACEHOLDER_SSID);
        }
        if option_env!("BRACCIO_WLAN_PASSWORD").is_none() {
            assert_eq!(WLAN_PASSWORD, PLACEHOLDER_PASSWORD);
        }
        if option_env!("BRACCIO_HOSTNAME").is_none() {
            assert_eq!(HOSTNAME, "braccio1");
        }
        if option_env!("BRACCIO_HTTP_SERVER_PORT").is_none() {
            assert_eq!(HTTP_SERVER_PORT, 80);
        }
    }
}
