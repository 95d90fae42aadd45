// Helpers that keep secrets out of logs and printed results.
use std::env;

/// Placeholder printed wherever a private key would appear.
pub const REDACTED: &str = "***";

/// Render a private key for logs: always `***`.
pub fn redact_key(_key: &str) -> &'static str {
    REDACTED
}

/// Redact a text body unless DEV_PRINT_SECRETS=1 is set in the environment.
/// Otherwise only the length is shown.
pub fn redact_body(s: &str) -> String {
    if env::var("DEV_PRINT_SECRETS").ok().as_deref() == Some("1") {
        return s.to_string();
    }
    format!("<redacted len={}>", s.len())
}

/// Short, non-reversible form of an address for log lines: `0x742d…f44e`.
pub fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 12 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
