//! binsift: heuristic triage of unknown binary artifacts.
//!
//! Given an in-memory byte buffer, binsift identifies the file type from
//! magic bytes, extracts and de-obfuscates printable strings, estimates
//! byte entropy, scores the resulting text corpus against category
//! vocabularies, surfaces network indicators (URLs, hosts, IPs, API paths,
//! RPC method names), and decodes Mach-O/ELF headers when the signature
//! warrants. The output is a serializable [`triage::report::AnalysisReport`].
//!
//! All core operations are synchronous, side-effect-free functions over a
//! borrowed buffer; the crate performs no I/O except in the batch driver,
//! which reads artifact files on behalf of the caller. Outputs are
//! best-effort hints, not verified program semantics: binsift never parses
//! instruction streams.

/// Error types for binsift operations.
pub mod error;
/// Logging and tracing infrastructure.
pub mod logging;
/// Triage pipeline: signatures, strings, entropy, classification, headers.
pub mod triage;

pub use error::{BinsiftError, Result};
pub use triage::api::{analyze_bytes, analyze_dylib};
pub use triage::batch::{run_batch, BatchReport};
pub use triage::config::AnalyzerConfig;
pub use triage::report::AnalysisReport;
