//! Configuration for the triage pipeline.
//!
//! Centralized configuration for all analyzer components with sensible
//! defaults. Category vocabularies live in [`crate::triage::classify`] and
//! are carried here as data so callers can extend them without touching
//! the counting algorithm.

use crate::triage::classify::CategorySet;
use serde::{Deserialize, Serialize};

/// Master configuration for the analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// String extraction configuration.
    pub strings: StringsConfig,
    /// Entropy estimation configuration.
    pub entropy: EntropyConfig,
    /// Per-field truncation caps applied to reports.
    pub limits: ReportLimits,
    /// I/O limits used by the batch driver.
    pub io: IoLimits,
    /// Category regex vocabulary for the pattern classifier.
    pub categories: CategorySet,
}

/// String extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringsConfig {
    /// Minimum token length for the general analysis path (default: 4).
    pub min_length: usize,
    /// Minimum token length for the dylib/batch path (default: 2).
    ///
    /// The batch path keeps short Objective-C selector fragments that the
    /// general path discards; the two thresholds are intentionally distinct.
    pub dylib_min_length: usize,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            dylib_min_length: 2,
        }
    }
}

/// Entropy estimation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyConfig {
    /// Sample cap in bytes; entropy is computed over this prefix.
    /// `None` disables sampling and scans the whole buffer (default: 64 KiB).
    pub sample_cap: Option<usize>,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            sample_cap: Some(64 * 1024),
        }
    }
}

/// Per-field truncation caps for reported indicator lists.
///
/// Internal extraction is unbounded; these caps bound the serialized view
/// so reports stay finite on adversarial inputs. Truncation keeps the
/// first N entries in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLimits {
    /// Cap for backends, urls, hostports, domains, ips, apis, rpc calls
    /// and network libraries (default: 30).
    pub max_indicators: usize,
    /// Cap for extracted fetch/axios call arguments (default: 20).
    pub max_network_calls: usize,
    /// Cap for synthesized sample request snippets (default: 5).
    pub max_sample_requests: usize,
    /// Cap for extracted class/method/import name lists (default: 50).
    pub max_symbols: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            max_indicators: 30,
            max_network_calls: 20,
            max_sample_requests: 5,
            max_symbols: 50,
        }
    }
}

/// Resource limits for batch file reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoLimits {
    /// Maximum bytes read from a single artifact (default: 10 MiB).
    pub max_read_bytes: u64,
    /// Maximum admissible artifact size (default: 100 MiB).
    pub max_file_size: u64,
}

impl Default for IoLimits {
    fn default() -> Self {
        Self {
            max_read_bytes: 10 * 1024 * 1024,
            max_file_size: 100 * 1024 * 1024,
        }
    }
}
