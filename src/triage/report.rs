//! Serializable analysis records.
//!
//! An [`AnalysisReport`] is created fresh per analysis call and has no
//! relationship to any other report; there is no shared or long-lived
//! state in the pipeline. Field semantics follow the records the
//! surrounding service serializes into its responses.

use crate::triage::classify::Classification;
use crate::triage::entropy::EntropyBand;
use crate::triage::headers::HeaderInfo;
use crate::triage::network::NetworkIndicators;
use crate::triage::signatures::SignatureInfo;
use crate::triage::symbols::SymbolGuesses;
use serde::{Deserialize, Serialize};

/// Complete triage record for one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Artifact name hint supplied by the caller, if any.
    pub name: Option<String>,
    /// Buffer length in bytes.
    pub size: u64,
    /// Human-readable size, e.g. `"1.21 MB"`.
    pub size_formatted: String,
    /// SHA-256 digest of the buffer, truncated to 16 hex chars.
    pub digest: String,
    /// Magic-byte identification.
    pub signature: SignatureInfo,
    /// Shannon entropy over the sampled prefix, in [0, 8].
    pub entropy: f64,
    /// Qualitative entropy band.
    pub entropy_band: EntropyBand,
    /// Number of unique tokens that survived filtering.
    pub strings_found: usize,
    /// Category match counts, risk score, confidence, warnings.
    pub classification: Classification,
    /// Network indicators, truncated to the configured report caps.
    pub network: NetworkIndicators,
    /// Guessed classes/methods/imports, truncated to the report cap.
    pub symbols: SymbolGuesses,
    /// Format-specific header record when the signature warranted one.
    pub header: Option<HeaderInfo>,
}

/// Format a byte count the way the report layer displays sizes.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (63 - bytes.leading_zeros() as u64) / 10;
    let exp = (exp as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / (1u64 << (exp * 10)) as f64;
    format!("{:.2} {}", value, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
