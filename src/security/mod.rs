pub mod redaction;

pub use redaction::{redact_body, redact_key, shorten_address, REDACTED};
