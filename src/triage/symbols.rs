//! Class, method, and import name guesses from extracted string tokens.
//!
//! Heuristic only: Objective-C style class names, selector-shaped method
//! names bucketed by kind, and framework mentions. These feed the report's
//! extracted-elements section, not any verified symbol table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

static RE_CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:class|@interface)\s+(\w+)").expect("valid class decl regex")
});

static RE_CLASS_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\w+(?:Handler|Controller|View|Manager))\b").expect("valid class suffix regex")
});

static RE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)framework|dylib|System|Foundation|UIKit|CoreData").expect("valid import regex")
});

/// Kind of a guessed method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Init,
    Lifecycle,
    Action,
    Getter,
    Setter,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MethodKind::Init => "init",
            MethodKind::Lifecycle => "lifecycle",
            MethodKind::Action => "action",
            MethodKind::Getter => "getter",
            MethodKind::Setter => "setter",
        };
        f.write_str(s)
    }
}

static METHOD_PATTERNS: Lazy<Vec<(MethodKind, Regex)>> = Lazy::new(|| {
    [
        (MethodKind::Init, r"init\w*"),
        (MethodKind::Lifecycle, r"did\w+|will\w+|view\w+"),
        (MethodKind::Action, r"handle\w+|process\w+|execute\w+"),
        (MethodKind::Getter, r"get\w+|is\w+"),
        (MethodKind::Setter, r"set\w+"),
    ]
    .into_iter()
    .map(|(kind, pat)| (kind, Regex::new(pat).expect("valid method regex")))
    .collect()
});

/// A guessed method name with its kind bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodGuess {
    pub name: String,
    pub kind: MethodKind,
}

/// Guessed symbol names extracted from the token list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolGuesses {
    pub classes: Vec<String>,
    pub methods: Vec<MethodGuess>,
    pub imports: Vec<String>,
}

impl SymbolGuesses {
    /// Extract symbol guesses from the de-obfuscated tokens.
    pub fn extract(tokens: &[String]) -> Self {
        Self {
            classes: extract_classes(tokens),
            methods: extract_methods(tokens),
            imports: extract_imports(tokens),
        }
    }

    /// Clone with each list capped at `max` entries, first N by insertion.
    pub fn bounded(&self, max: usize) -> Self {
        Self {
            classes: self.classes.iter().take(max).cloned().collect(),
            methods: self.methods.iter().take(max).cloned().collect(),
            imports: self.imports.iter().take(max).cloned().collect(),
        }
    }
}

/// Class-name guesses: declarations, plus Handler/Controller/View/Manager
/// suffixed identifiers. Requires a leading uppercase letter and length > 2.
fn extract_classes(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    let mut add = |name: &str| {
        if name.len() > 2
            && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && seen.insert(name.to_string())
        {
            out.push(name.to_string());
        }
    };

    for token in tokens {
        for caps in RE_CLASS_DECL.captures_iter(token) {
            add(&caps[1]);
        }
        for caps in RE_CLASS_SUFFIX.captures_iter(token) {
            add(&caps[1]);
        }
    }
    out
}

/// Method-name guesses: a token matching a selector-shaped pattern is kept
/// whole, bucketed by the first pattern kind that hits.
fn extract_methods(tokens: &[String]) -> Vec<MethodGuess> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        for (kind, re) in METHOD_PATTERNS.iter() {
            if re.is_match(token) {
                if seen.insert(token.clone()) {
                    out.push(MethodGuess {
                        name: token.clone(),
                        kind: *kind,
                    });
                }
                break;
            }
        }
    }
    out
}

/// Tokens mentioning a framework or linkage keyword.
fn extract_imports(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for token in tokens {
        if RE_IMPORT.is_match(token) && seen.insert(token.clone()) {
            out.push(token.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn class_declarations_and_suffixes() {
        let tokens = toks(&[
            "@interface PaymentManager : NSObject",
            "class SessionHandler",
            "RouteController",
            "lowercasehandler",
        ]);
        let got = extract_classes(&tokens);
        assert!(got.contains(&"PaymentManager".to_string()));
        assert!(got.contains(&"SessionHandler".to_string()));
        assert!(got.contains(&"RouteController".to_string()));
        assert!(!got.iter().any(|c| c == "lowercasehandler"));
    }

    #[test]
    fn methods_bucketed_by_first_matching_kind() {
        let tokens = toks(&["initWithFrame:", "viewDidLoad", "handlePayment", "setToken:"]);
        let methods = extract_methods(&tokens);
        let kind_of = |name: &str| {
            methods
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.kind)
                .unwrap()
        };
        assert_eq!(kind_of("initWithFrame:"), MethodKind::Init);
        assert_eq!(kind_of("viewDidLoad"), MethodKind::Lifecycle);
        assert_eq!(kind_of("handlePayment"), MethodKind::Action);
        assert_eq!(kind_of("setToken:"), MethodKind::Setter);
    }

    #[test]
    fn method_guesses_are_unique() {
        let tokens = toks(&["viewDidLoad", "viewDidLoad"]);
        assert_eq!(extract_methods(&tokens).len(), 1);
    }

    #[test]
    fn imports_match_framework_mentions() {
        let tokens = toks(&["Foundation/Foundation.h", "UIKit", "plain text"]);
        let imports = extract_imports(&tokens);
        assert_eq!(imports.len(), 2);
    }

    #[test]
    fn bounded_caps_each_list() {
        let tokens: Vec<String> = (0..60).map(|i| format!("handleEvent{i}")).collect();
        let guesses = SymbolGuesses::extract(&tokens);
        assert_eq!(guesses.methods.len(), 60);
        assert_eq!(guesses.bounded(50).methods.len(), 50);
    }
}
