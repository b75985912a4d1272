//! Pattern-based category classification of a text corpus.
//!
//! Each category carries one or more case-insensitive regexes; all
//! non-overlapping matches across the corpus are counted. The risk score
//! is the exact sum of category counts and confidence is a pure function
//! of it. Vocabularies are configuration data, not logic: extend
//! [`CategorySet`] without touching the counting algorithm.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Heuristic categories scored against the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crypto,
    Network,
    Storage,
    Ui,
    Threading,
    Security,
    Native,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Crypto,
        Category::Network,
        Category::Storage,
        Category::Ui,
        Category::Threading,
        Category::Security,
        Category::Native,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Crypto => "crypto",
            Category::Network => "network",
            Category::Storage => "storage",
            Category::Ui => "ui",
            Category::Threading => "threading",
            Category::Security => "security",
            Category::Native => "native",
        };
        f.write_str(s)
    }
}

/// Default regex vocabulary, one pattern list per category.
const DEFAULT_VOCABULARY: &[(Category, &[&str])] = &[
    (
        Category::Crypto,
        &["aes|des|rsa|sha|md5|hmac|encrypt|decrypt"],
    ),
    (
        Category::Network,
        &["http|tcp|socket|ssl|tls|fetch|request|websocket"],
    ),
    (
        Category::Storage,
        &["database|sqlite|realm|core.data|plist|keychain"],
    ),
    (
        Category::Ui,
        &["uiview|view.did|bounds|frame|animation|gesture"],
    ),
    (
        Category::Threading,
        &["dispatch|thread|mutex|semaphore|queue|async"],
    ),
    (
        Category::Security,
        &["authenticate|authorize|token|password|secret|private|secure"],
    ),
    (
        Category::Native,
        &["jni|native|bridge|plugin|objective.?c|swift"],
    ),
];

/// Compiled category vocabulary.
#[derive(Debug, Clone)]
pub struct CategorySet {
    entries: Vec<(Category, Vec<Regex>)>,
}

impl CategorySet {
    /// Compile a vocabulary of (category, regex fragments). Fragments are
    /// matched case-insensitively.
    pub fn compile(
        vocabulary: &[(Category, &[&str])],
    ) -> Result<Self, regex::Error> {
        let mut entries = Vec::with_capacity(vocabulary.len());
        for (category, fragments) in vocabulary {
            let mut regexes = Vec::with_capacity(fragments.len());
            for fragment in *fragments {
                regexes.push(Regex::new(&format!("(?i){}", fragment))?);
            }
            entries.push((*category, regexes));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(Category, Vec<Regex>)] {
        &self.entries
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::compile(DEFAULT_VOCABULARY).expect("default vocabulary compiles")
    }
}

/// Classification result over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Match counts per category; zero-count categories are absent.
    pub categories: BTreeMap<Category, usize>,
    /// Exact sum of all category match counts.
    pub risk_score: usize,
    /// `min(100, risk_score * 5)`.
    pub confidence: u8,
    /// One `"<CATEGORY>: n pattern(s)"` line per nonzero category, in
    /// category order.
    pub warnings: Vec<String>,
}

/// Count all category pattern matches across the corpus.
pub fn classify(corpus: &str, set: &CategorySet) -> Classification {
    let mut result = Classification::default();

    for (category, regexes) in set.entries() {
        let mut count = 0usize;
        for re in regexes {
            count += re.find_iter(corpus).count();
        }
        if count > 0 {
            result.categories.insert(*category, count);
            result.risk_score += count;
            result
                .warnings
                .push(format!("{}: {} pattern(s)", category.to_string().to_uppercase(), count));
        }
    }

    result.confidence = result.risk_score.saturating_mul(5).min(100) as u8;
    result
}
