//! Compile-time build metadata
//!
//! `build.rs` sets `NVE_BUILD_NUMBER` and `NVE_BUILD_TIMESTAMP`; builds
//! without them report build 0 and an unknown timestamp.

use crate::config::Config;

pub const BUILD_NUMBER: u64 = match option_env!("NVE_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// ISO 8601, UTC
pub const BUILD_TIMESTAMP: &str = match option_env!("NVE_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// One-line description of the build and the lookup backend
pub fn summary(config: &Config) -> String {
    let provider = if config.provider_configured() {
        "edamam"
    } else {
        "none (approximate estimates only)"
    };
    format!(
        "NVE v{} build {} ({}) | provider: {} | lookup timeout: {}s",
        VERSION,
        BUILD_NUMBER,
        BUILD_TIMESTAMP,
        provider,
        config.lookup_timeout.as_secs()
    )
}

/// Print the startup banner to stderr
pub fn print_startup_banner(config: &Config) {
    eprintln!("===============================================");
    eprintln!("  Nutrition Vector Engine");
    eprintln!("  {}", summary(config));
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64("1234"), Some(1234));
        assert_eq!(parse_u64("12a"), None);
        assert_eq!(parse_u64(""), None);
    }

    #[test]
    fn test_summary_names_provider_state() {
        let config = Config {
            edamam: None,
            lookup_timeout: Duration::from_secs(3),
        };
        let line = summary(&config);
        assert!(line.starts_with(&format!("NVE v{}", VERSION)));
        assert!(line.contains("provider: none"));
        assert!(line.contains("lookup timeout: 3s"));
    }
}
