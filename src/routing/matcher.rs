//! Target matching logic.
//!
//! # Responsibilities
//! - Compile a target's pattern once, at load time
//! - Match raw first-packet bytes against the compiled pattern
//!
//! # Design Decisions
//! - Byte-oriented regex: first packets are not guaranteed to be UTF-8
//! - Compiled matchers are immutable and shareable across threads
//! - Unanchored search, a pattern matches anywhere in the packet
//! - Rust `regex` syntax, close to RE2 but not identical: `\Q...\E` quoting
//!   is rejected, and `\w`, `\d`, `\s` are Unicode-aware unless a pattern
//!   opts out with `(?-u)`

use regex::bytes::Regex;

/// Compiled form of a target's `regexp` pattern.
#[derive(Debug, Clone)]
pub struct TargetMatcher {
    regex: Regex,
}

impl TargetMatcher {
    /// Compile a pattern into a matcher.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns true if the packet contains a match for the pattern.
    pub fn is_match(&self, packet: &[u8]) -> bool {
        self.regex.is_match(packet)
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_binary_packet() {
        let matcher = TargetMatcher::compile(r"^\x16\x03").unwrap();

        assert!(matcher.is_match(&[0x16, 0x03, 0x01, 0xff, 0xfe]));
        assert!(!matcher.is_match(b"GET / HTTP/1.1\r\n"));
    }

    #[test]
    fn test_unanchored_pattern() {
        let matcher = TargetMatcher::compile("HTTP/1\\.[01]").unwrap();

        assert!(matcher.is_match(b"GET /index.html HTTP/1.1\r\nHost: a\r\n"));
        assert!(!matcher.is_match(b"SSH-2.0-OpenSSH_9.6\r\n"));
        assert_eq!(matcher.as_str(), "HTTP/1\\.[01]");
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let matcher = TargetMatcher::compile("").unwrap();
        assert!(matcher.is_match(b""));
        assert!(matcher.is_match(b"anything"));
    }

    #[test]
    fn test_dialect() {
        assert!(TargetMatcher::compile(r"\QGET /\E").is_err());

        let unicode = TargetMatcher::compile(r"^\d+$").unwrap();
        assert!(unicode.is_match("١٢٣".as_bytes()));

        let ascii = TargetMatcher::compile(r"(?-u)^\d+$").unwrap();
        assert!(ascii.is_match(b"123"));
        assert!(!ascii.is_match("١٢٣".as_bytes()));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(TargetMatcher::compile("(unclosed").is_err());
    }
}
