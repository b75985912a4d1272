//! Printable-string extraction from binary buffers.
//!
//! A single linear scan with O(1) auxiliary state: printable ASCII plus
//! tab/LF/CR accumulate into the current run; any other byte terminates it.
//! Runs shorter than the minimum, or consisting only of whitespace, are
//! dropped. Output is deduplicated in first-insertion order so that any
//! downstream "first N" truncation is deterministic.

use std::collections::HashSet;

#[inline]
fn is_string_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r'
}

/// Extract the unique maximal printable runs of length >= `min_length`.
pub fn extract_strings(data: &[u8], min_length: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        if current.len() >= min_length && !current.trim().is_empty() {
            if !seen.contains(current.as_str()) {
                seen.insert(current.clone());
                out.push(std::mem::take(current));
                return;
            }
        }
        current.clear();
    };

    for &b in data {
        if is_string_byte(b) {
            current.push(b as char);
        } else {
            flush(&mut current);
        }
    }
    flush(&mut current);

    out
}

/// Keep tokens worth analyzing: longer than two chars with at least one
/// ASCII letter. Filters out alignment padding and numeric noise before
/// de-obfuscation.
pub fn filter_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|s| s.len() > 2 && s.chars().any(|c| c.is_ascii_alphabetic()))
        .cloned()
        .collect()
}
