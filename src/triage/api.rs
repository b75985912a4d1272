//! Analysis pipeline entry point.
//!
//! `analyze_bytes` wires the components together: signature and entropy
//! run directly on the buffer; the strings path feeds the de-obfuscated
//! corpus into the classifier, the network extractor, and symbol guessing;
//! header decoding runs only when the signature warrants it. Every call
//! builds a fresh report from the buffer it was given.

use crate::triage::classify;
use crate::triage::config::AnalyzerConfig;
use crate::triage::deobfuscate::deobfuscate;
use crate::triage::entropy::{sampled_entropy, EntropyBand};
use crate::triage::headers::{analyze_elf, analyze_macho, HeaderInfo};
use crate::triage::network::NetworkIndicators;
use crate::triage::report::{format_bytes, AnalysisReport};
use crate::triage::signatures::{self, FileKind};
use crate::triage::strings::{extract_strings, filter_tokens};
use crate::triage::symbols::SymbolGuesses;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

fn digest_of(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut hex = hex::encode(digest);
    hex.truncate(16);
    hex
}

/// Extension of a name hint, without the dot.
fn extension_of(name: Option<&str>) -> Option<&str> {
    let name = name?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Run the full triage pipeline over one in-memory artifact.
///
/// `name` is an optional file name hint used for the unknown-signature
/// fallback label and for the report. The buffer is never mutated and no
/// I/O is performed. String extraction uses the general minimum-length
/// threshold; use [`analyze_dylib`] for the shorter dylib threshold.
pub fn analyze_bytes(data: &[u8], name: Option<&str>, cfg: &AnalyzerConfig) -> AnalysisReport {
    run_pipeline(data, name, cfg, cfg.strings.min_length)
}

/// Run the triage pipeline with the dylib minimum string length.
///
/// Dylib string tables carry two-character Objective-C selector fragments
/// that the general threshold discards; this is the entry point the batch
/// driver uses.
pub fn analyze_dylib(data: &[u8], name: Option<&str>, cfg: &AnalyzerConfig) -> AnalysisReport {
    run_pipeline(data, name, cfg, cfg.strings.dylib_min_length)
}

fn run_pipeline(
    data: &[u8],
    name: Option<&str>,
    cfg: &AnalyzerConfig,
    min_length: usize,
) -> AnalysisReport {
    let span = tracing::info_span!(
        "analyze",
        name = name.unwrap_or("<memory>"),
        size_bytes = data.len()
    );
    let _g = span.enter();
    info!("start");

    debug!(phase = "signature", "identify magic bytes");
    let signature = signatures::identify(data, extension_of(name));

    debug!(phase = "entropy", "sampled estimate");
    let entropy = sampled_entropy(data, &cfg.entropy);
    let entropy_band = EntropyBand::from_entropy(entropy);

    debug!(phase = "headers", kind = ?signature.kind, "format-specific decode");
    let header = match signature.kind {
        k if k.is_macho() => analyze_macho(data).map(HeaderInfo::MachO),
        FileKind::Elf => analyze_elf(data).map(HeaderInfo::Elf),
        _ => None,
    };

    debug!(phase = "strings", min = min_length, "extract");
    let raw_tokens = extract_strings(data, min_length);
    let tokens = filter_tokens(&raw_tokens);
    let deobfuscated: Vec<String> = tokens.iter().map(|t| deobfuscate(t)).collect();
    let corpus = deobfuscated.join("\n");

    debug!(phase = "classify", tokens = deobfuscated.len(), "score corpus");
    let classification = classify::classify(&corpus, &cfg.categories);

    debug!(phase = "network", "indicator extraction");
    let network = NetworkIndicators::scan(&corpus).bounded(&cfg.limits);

    debug!(phase = "symbols", "class/method/import guesses");
    let symbols = SymbolGuesses::extract(&deobfuscated).bounded(cfg.limits.max_symbols);

    let report = AnalysisReport {
        name: name.map(|s| s.to_string()),
        size: data.len() as u64,
        size_formatted: format_bytes(data.len() as u64),
        digest: digest_of(data),
        signature,
        entropy,
        entropy_band,
        strings_found: deobfuscated.len(),
        classification,
        network,
        symbols,
        header,
    };
    info!(
        risk_score = report.classification.risk_score,
        backends = report.network.backends.len(),
        "complete"
    );
    report
}
