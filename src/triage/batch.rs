//! Sequential continue-on-error batch driver.
//!
//! Runs the full analysis pipeline over a list of on-disk artifacts and
//! aggregates the network surface across the whole batch. A file that
//! cannot be read is counted as failed and skipped; it never aborts the
//! rest of the batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::error::{BinsiftError, Result};
use crate::triage::api::analyze_dylib;
use crate::triage::config::AnalyzerConfig;
use crate::triage::io::read_artifact;
use crate::triage::report::AnalysisReport;

/// Admission cap on the number of artifacts per batch.
pub const MAX_BATCH_FILES: usize = 10_000;

/// One artifact that could not be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Path as submitted by the caller.
    pub path: PathBuf,
    /// Rendered read error.
    pub error: String,
}

/// Deduplicated network surface across every processed artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchAggregates {
    /// Union of per-file absolute URLs, first-seen order.
    pub urls: Vec<String>,
    /// Union of per-file backends, first-seen order.
    pub backends: Vec<String>,
    /// Union of per-file bare domains.
    pub domains: Vec<String>,
    /// Union of per-file IPv4 literals.
    pub ips: Vec<String>,
    /// Union of per-file API paths.
    pub apis: Vec<String>,
}

/// Headline counts for the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub unique_urls: usize,
    pub unique_backends: usize,
    pub unique_domains: usize,
    pub unique_ips: usize,
    pub unique_apis: usize,
    /// Processed over total, e.g. `"66.7%"`.
    pub success_rate: String,
}

/// Outcome of a whole batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of paths submitted.
    pub total_files: usize,
    /// Number of artifacts analyzed.
    pub processed: usize,
    /// Number of artifacts skipped because they could not be read.
    pub failed: usize,
    /// Per-file reports, in submission order of the successes.
    pub reports: Vec<AnalysisReport>,
    /// Per-file read failures, in submission order.
    pub failures: Vec<BatchFailure>,
    /// Cross-file network surface.
    pub aggregates: BatchAggregates,
    pub summary: BatchSummary,
    /// When the batch finished.
    pub timestamp: DateTime<Utc>,
}

/// Analyze every path sequentially, skipping unreadable files.
///
/// Rejects empty batches and batches over [`MAX_BATCH_FILES`] before any
/// file is touched. Read failures (missing file, oversized artifact) are
/// recorded and the batch continues; only admission failures are errors.
pub fn run_batch<P: AsRef<Path>>(paths: &[P], cfg: &AnalyzerConfig) -> Result<BatchReport> {
    if paths.is_empty() {
        return Err(BinsiftError::EmptyBatch);
    }
    if paths.len() > MAX_BATCH_FILES {
        return Err(BinsiftError::BatchTooLarge {
            count: paths.len(),
            limit: MAX_BATCH_FILES,
        });
    }

    let span = info_span!("batch", total = paths.len());
    let _guard = span.enter();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    let mut aggregates = BatchAggregates::default();
    let mut seen_urls = HashSet::new();
    let mut seen_backends = HashSet::new();
    let mut seen_domains = HashSet::new();
    let mut seen_ips = HashSet::new();
    let mut seen_apis = HashSet::new();

    for path in paths {
        let path = path.as_ref();
        let data = match read_artifact(path, &cfg.io) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable artifact");
                failures.push(BatchFailure {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        let name = path.file_name().and_then(|n| n.to_str());
        let report = analyze_dylib(&data, name, cfg);
        debug!(
            path = %path.display(),
            risk = report.classification.risk_score,
            backends = report.network.backends.len(),
            "artifact analyzed"
        );

        merge_unique(&mut aggregates.urls, &mut seen_urls, &report.network.urls);
        merge_unique(&mut aggregates.backends, &mut seen_backends, &report.network.backends);
        merge_unique(&mut aggregates.domains, &mut seen_domains, &report.network.domains);
        merge_unique(&mut aggregates.ips, &mut seen_ips, &report.network.ips);
        merge_unique(&mut aggregates.apis, &mut seen_apis, &report.network.apis);
        reports.push(report);
    }

    let processed = reports.len();
    let failed = failures.len();
    let total_files = paths.len();
    let summary = BatchSummary {
        unique_urls: aggregates.urls.len(),
        unique_backends: aggregates.backends.len(),
        unique_domains: aggregates.domains.len(),
        unique_ips: aggregates.ips.len(),
        unique_apis: aggregates.apis.len(),
        success_rate: format!("{:.1}%", processed as f64 / total_files as f64 * 100.0),
    };
    info!(total_files, processed, failed, "batch complete");

    Ok(BatchReport {
        total_files,
        processed,
        failed,
        reports,
        failures,
        aggregates,
        summary,
        timestamp: Utc::now(),
    })
}

fn merge_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, values: &[String]) {
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_batch_is_rejected() {
        let paths: Vec<PathBuf> = Vec::new();
        let err = run_batch(&paths, &AnalyzerConfig::default()).unwrap_err();
        assert!(matches!(err, BinsiftError::EmptyBatch));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let paths: Vec<PathBuf> = (0..MAX_BATCH_FILES + 1)
            .map(|i| PathBuf::from(format!("artifact-{i}.dylib")))
            .collect();
        let err = run_batch(&paths, &AnalyzerConfig::default()).unwrap_err();
        match err {
            BinsiftError::BatchTooLarge { count, limit } => {
                assert_eq!(count, MAX_BATCH_FILES + 1);
                assert_eq!(limit, MAX_BATCH_FILES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_counted_not_fatal() {
        let dir = TempDir::new().unwrap();
        let a = write_sample(&dir, "a.bin", b"https://api.example.com/v1\x00data");
        let b = write_sample(&dir, "b.bin", b"plain text with no indicators");
        let missing = dir.path().join("missing.bin");

        let report = run_batch(&[a, missing.clone(), b], &AnalyzerConfig::default()).unwrap();
        assert_eq!(report.total_files, 3);
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, missing);
        assert_eq!(report.reports.len(), 2);
        assert_eq!(report.summary.success_rate, "66.7%");
    }

    #[test]
    fn aggregates_dedup_across_files() {
        let dir = TempDir::new().unwrap();
        let a = write_sample(&dir, "a.bin", b"https://api.example.com/v1\x00/api/users\x00");
        let b = write_sample(&dir, "b.bin", b"https://api.example.com/v1\x00/api/orders\x00");

        let report = run_batch(&[a, b], &AnalyzerConfig::default()).unwrap();
        assert_eq!(report.aggregates.urls, vec!["https://api.example.com/v1"]);
        assert_eq!(report.aggregates.backends, vec!["https://api.example.com/v1"]);
        assert_eq!(report.aggregates.apis, vec!["/api/users", "/api/orders"]);
        assert_eq!(report.summary.unique_urls, 1);
        assert_eq!(report.summary.unique_backends, 1);
        assert_eq!(report.summary.unique_apis, 2);
        assert_eq!(report.summary.success_rate, "100.0%");
    }

    #[test]
    fn batch_uses_dylib_string_threshold() {
        let dir = TempDir::new().unwrap();
        // "ui:" is shorter than the general minimum of 4
        let p = write_sample(&dir, "short.dylib", b"ui:\x00padding bytes\x00");
        let report = run_batch(&[p], &AnalyzerConfig::default()).unwrap();
        assert_eq!(report.reports[0].strings_found, 2);
    }

    #[test]
    fn oversized_artifact_is_skipped() {
        let dir = TempDir::new().unwrap();
        let big = write_sample(&dir, "big.bin", &[0u8; 256]);
        let ok = write_sample(&dir, "ok.bin", b"hello backend.example.com:9000");

        let mut cfg = AnalyzerConfig::default();
        cfg.io.max_file_size = 128;
        let report = run_batch(&[big, ok], &cfg).unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.failed, 1);
        assert!(report.failures[0].error.contains("too large"));
    }
}
