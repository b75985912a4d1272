//! Best-effort de-obfuscation of extracted string tokens.
//!
//! Three ordered transforms: `\xHH` hex escapes, `\uHHHH` unicode escapes,
//! and whole-token base64. Each produces a candidate replacement that is
//! accepted only if decoding succeeds; failures are swallowed and the token
//! is never dropped, only possibly left unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_HEX_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\x([0-9a-fA-F]{2})").expect("valid hex escape regex"));

static RE_UNICODE_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").expect("valid unicode escape regex"));

/// Whole-token base64 shape: alphabet-only and at least 20 characters.
static RE_BASE64_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/=]{20,}$").expect("valid base64 shape regex"));

fn decode_hex_escapes(s: &str) -> String {
    RE_HEX_ESCAPE
        .replace_all(s, |caps: &Captures| {
            // Two hex digits always parse; the byte is taken as a code point
            match u8::from_str_radix(&caps[1], 16) {
                Ok(b) => char::from(b).to_string(),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_unicode_escapes(s: &str) -> String {
    RE_UNICODE_ESCAPE
        .replace_all(s, |caps: &Captures| {
            match u32::from_str_radix(&caps[1], 16).ok().and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// De-obfuscate a single token. Pure and total: never fails the caller.
pub fn deobfuscate(token: &str) -> String {
    let mut result = decode_hex_escapes(token);
    result = decode_unicode_escapes(&result);

    if RE_BASE64_TOKEN.is_match(&result) {
        if let Ok(bytes) = BASE64.decode(result.as_bytes()) {
            if let Ok(text) = String::from_utf8(bytes) {
                // Discard decodes that look like binary noise
                if text
                    .chars()
                    .any(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    result = text;
                }
            }
        }
    }

    result
}
