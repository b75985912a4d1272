//! Triage runtime for binary artifact analysis.
//!
//! This module provides the core triage functionality: signature
//! identification, string extraction and de-obfuscation, entropy
//! estimation, category classification, network indicator extraction,
//! and narrow Mach-O/ELF header decoding. Everything operates on an
//! in-memory buffer, deterministically and without shared state.

pub mod api;
pub mod batch;
pub mod classify;
pub mod config;
pub mod deobfuscate;
pub mod entropy;
pub mod headers;
pub mod io;
pub mod network;
pub mod report;
pub mod signatures;
pub mod strings;
pub mod symbols;

// Re-export key types for convenience
pub use batch::{run_batch, BatchReport};
pub use classify::{Category, Classification};
pub use entropy::EntropyBand;
pub use headers::{ElfHeader, HeaderInfo, MachHeader};
pub use network::NetworkIndicators;
pub use report::AnalysisReport;
pub use signatures::{FileKind, SignatureClass, SignatureInfo};
