//! Network indicator extraction from a text corpus.
//!
//! Dedicated precompiled patterns pull URLs, host:port tokens, domains,
//! IPv4 literals, API-style paths, Web3 RPC method names, JSON-RPC markers,
//! fetch/axios call arguments, and known native networking library symbols
//! out of the de-obfuscated string corpus. All list outputs are
//! deduplicated in first-insertion order; `bounded` applies the per-field
//! report caps. Patterns are conservative to avoid catastrophic
//! backtracking.

use crate::triage::config::ReportLimits;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static RE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:https?|wss?)://[^\s\x00"'<>\[\]{}]{5,}"#).expect("valid URL regex")
});

static RE_HOSTPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:/[^\s]*)?|\blocalhost(?::\d{1,5})?(?:/[^\s]*)?",
    )
    .expect("valid hostport regex")
});

static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}").expect("valid domain regex")
});

static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(?::\d{1,5})?",
    )
    .expect("valid ipv4 regex")
});

static RE_API_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:/api/|/graphql|/rpc)[a-zA-Z0-9/._?=&-]*").expect("valid api path regex")
});

static RE_GRAPHQL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)graphql").expect("valid regex"));

static RE_RPC_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:eth_|web3_|net_|personal_|admin_|miner_|shh_|db_|txpool_|debug_|trace_)\w+\b",
    )
    .expect("valid rpc call regex")
});

static RE_JSONRPC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)jsonrpc|"method"\s*:\s*"\w+"|"params"\s*:\s*\["#).expect("valid jsonrpc regex")
});

static RE_FETCH_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)fetch\s*\(\s*['"][^'"]+['"]"#).expect("valid fetch call regex")
});

static RE_AXIOS_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)axios\.(?:get|post|put|delete|patch)\s*\(\s*['"][^'"]+['"]"#)
        .expect("valid axios call regex")
});

static RE_NETWORK_LIB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:NSURLSession|AFHTTPSessionManager|Alamofire|NSURLConnection|CFNetwork|curl|libcurl)\b",
    )
    .expect("valid network lib regex")
});

/// Dedup helper preserving first-insertion order.
fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, value: String) {
    if seen.insert(value.clone()) {
        out.push(value);
    }
}

/// Extracted network indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkIndicators {
    /// Absolute http(s)/ws(s) URLs.
    pub urls: Vec<String>,
    /// Dotted hostnames with optional port/path, outside of full URLs.
    pub hostports: Vec<String>,
    /// Bare dotted hostnames longer than 3 characters.
    pub domains: Vec<String>,
    /// IPv4 literals, optionally with a trailing port.
    pub ips: Vec<String>,
    /// API-style paths (`/api/…`, `/graphql…`, `/rpc…`).
    pub apis: Vec<String>,
    /// Web3-style RPC method names (`eth_…`, `web3_…`, …).
    pub rpc_calls: Vec<String>,
    /// First-argument strings of fetch/axios call sites, unquoted.
    pub network_calls: Vec<String>,
    /// Known native networking library symbols.
    pub network_libraries: Vec<String>,
    /// True when the corpus carries a JSON-RPC keyword or structural marker.
    pub has_jsonrpc: bool,
    /// Dedup union of urls, hostports and ips, in that order.
    pub backends: Vec<String>,
    /// One illustrative GET request snippet per unique backend.
    pub sample_requests: Vec<String>,
}

impl NetworkIndicators {
    /// Scan a corpus and extract every indicator set.
    pub fn scan(corpus: &str) -> Self {
        let mut out = Self::default();

        let mut url_spans: Vec<(usize, usize)> = Vec::new();
        {
            let mut seen = HashSet::new();
            for m in RE_URL.find_iter(corpus) {
                url_spans.push((m.start(), m.end()));
                push_unique(&mut out.urls, &mut seen, m.as_str().to_string());
            }
        }

        // Host:port forms not already captured inside a full URL
        {
            let mut seen = HashSet::new();
            for m in RE_HOSTPORT.find_iter(corpus) {
                let inside_url = url_spans
                    .iter()
                    .any(|&(s, e)| m.start() >= s && m.end() <= e);
                if !inside_url {
                    push_unique(&mut out.hostports, &mut seen, m.as_str().to_string());
                }
            }
        }

        {
            let mut seen = HashSet::new();
            for m in RE_DOMAIN.find_iter(corpus) {
                if m.as_str().len() > 3 {
                    push_unique(&mut out.domains, &mut seen, m.as_str().to_string());
                }
            }
        }

        {
            let mut seen = HashSet::new();
            for m in RE_IPV4.find_iter(corpus) {
                push_unique(&mut out.ips, &mut seen, m.as_str().to_string());
            }
        }

        {
            let mut seen = HashSet::new();
            for m in RE_API_PATH.find_iter(corpus) {
                push_unique(&mut out.apis, &mut seen, m.as_str().to_string());
            }
            // A bare graphql mention implies the endpoint even without a path
            if RE_GRAPHQL.is_match(corpus) {
                push_unique(&mut out.apis, &mut seen, "/graphql".to_string());
            }
        }

        {
            let mut seen = HashSet::new();
            for m in RE_RPC_CALL.find_iter(corpus) {
                push_unique(&mut out.rpc_calls, &mut seen, m.as_str().to_string());
            }
        }

        out.has_jsonrpc = RE_JSONRPC.is_match(corpus);

        {
            let mut seen = HashSet::new();
            for m in RE_FETCH_CALL.find_iter(corpus) {
                push_unique(
                    &mut out.network_calls,
                    &mut seen,
                    strip_call_prefix(m.as_str()),
                );
            }
            for m in RE_AXIOS_CALL.find_iter(corpus) {
                push_unique(
                    &mut out.network_calls,
                    &mut seen,
                    strip_call_prefix(m.as_str()),
                );
            }
        }

        {
            let mut seen = HashSet::new();
            for m in RE_NETWORK_LIB.find_iter(corpus) {
                push_unique(&mut out.network_libraries, &mut seen, m.as_str().to_string());
            }
        }

        // Backends: urls, then hostports, then ips
        {
            let mut seen = HashSet::new();
            for src in [&out.urls, &out.hostports, &out.ips] {
                for v in src {
                    push_unique(&mut out.backends, &mut seen, v.clone());
                }
            }
        }

        out.sample_requests = out.backends.iter().map(|b| sample_request(b)).collect();

        out
    }

    /// Clone with the per-field report caps applied, first N by insertion.
    pub fn bounded(&self, limits: &ReportLimits) -> Self {
        let cap = |v: &[String], n: usize| v.iter().take(n).cloned().collect::<Vec<_>>();
        Self {
            urls: cap(&self.urls, limits.max_indicators),
            hostports: cap(&self.hostports, limits.max_indicators),
            domains: cap(&self.domains, limits.max_indicators),
            ips: cap(&self.ips, limits.max_indicators),
            apis: cap(&self.apis, limits.max_indicators),
            rpc_calls: cap(&self.rpc_calls, limits.max_indicators),
            network_calls: cap(&self.network_calls, limits.max_network_calls),
            network_libraries: cap(&self.network_libraries, limits.max_indicators),
            has_jsonrpc: self.has_jsonrpc,
            backends: cap(&self.backends, limits.max_indicators),
            sample_requests: cap(&self.sample_requests, limits.max_sample_requests),
        }
    }
}

/// Strip the `fetch(` / `axios.<verb>(` prefix and the quotes around the
/// first argument.
fn strip_call_prefix(call: &str) -> String {
    let arg = match call.find('(') {
        Some(i) => &call[i + 1..],
        None => call,
    };
    arg.trim().trim_matches(|c| c == '\'' || c == '"').to_string()
}

/// Deterministic illustrative GET snippet for a backend, used as a
/// reporting aid only.
fn sample_request(backend: &str) -> String {
    format!(
        "fetch('{backend}', {{\n  method: 'GET',\n  headers: {{ 'Content-Type': 'application/json' }}\n}})\n  .then(r => r.json())\n  .then(console.log)\n  .catch(console.error);"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_apis_from_call_sites() {
        let corpus =
            r#"fetch('http://example.com/api/data'); axios.post("https://api.test.com/v1", {});"#;
        let n = NetworkIndicators::scan(corpus);
        assert!(n.urls.contains(&"http://example.com/api/data".to_string()));
        assert!(n.urls.contains(&"https://api.test.com/v1".to_string()));
        assert!(n.apis.contains(&"/api/data".to_string()));
        assert_eq!(
            n.network_calls,
            vec!["http://example.com/api/data", "https://api.test.com/v1"]
        );
    }

    #[test]
    fn hostports_exclude_hosts_inside_urls() {
        let corpus = "see https://cdn.example.com/lib.js and api.backend.io:8443/v2";
        let n = NetworkIndicators::scan(corpus);
        assert_eq!(n.hostports, vec!["api.backend.io:8443/v2"]);
        assert!(n.domains.contains(&"cdn.example.com".to_string()));
        assert!(n.domains.contains(&"api.backend.io".to_string()));
    }

    #[test]
    fn localhost_counts_as_hostport() {
        let n = NetworkIndicators::scan("connect to localhost:3000/health");
        assert_eq!(n.hostports, vec!["localhost:3000/health"]);
    }

    #[test]
    fn ips_with_optional_port() {
        let n = NetworkIndicators::scan("node at 10.0.0.5:8545 and 203.0.113.7");
        assert_eq!(n.ips, vec!["10.0.0.5:8545", "203.0.113.7"]);
        assert!(n.backends.contains(&"10.0.0.5:8545".to_string()));
    }

    #[test]
    fn short_domains_filtered() {
        let n = NetworkIndicators::scan("a.b but registry.npmjs.org stays");
        assert!(!n.domains.contains(&"a.b".to_string()));
        assert!(n.domains.contains(&"registry.npmjs.org".to_string()));
    }

    #[test]
    fn graphql_mention_yields_synthetic_api() {
        let n = NetworkIndicators::scan("uses GraphQL under the hood");
        assert_eq!(n.apis, vec!["/graphql"]);

        // an explicit path is kept and not duplicated
        let n = NetworkIndicators::scan("POST /graphql/v2 endpoint");
        assert_eq!(n.apis, vec!["/graphql/v2", "/graphql"]);
    }

    #[test]
    fn rpc_methods_and_jsonrpc_marker() {
        let corpus = r#"{"jsonrpc":"2.0","method":"eth_getBalance","params":["0x0"]}"#;
        let n = NetworkIndicators::scan(corpus);
        assert_eq!(n.rpc_calls, vec!["eth_getBalance"]);
        assert!(n.has_jsonrpc);

        let n = NetworkIndicators::scan("web3_clientVersion trace_block plain text");
        assert_eq!(n.rpc_calls, vec!["web3_clientVersion", "trace_block"]);
        assert!(!n.has_jsonrpc);
    }

    #[test]
    fn structural_jsonrpc_marker_without_keyword() {
        let n = NetworkIndicators::scan(r#"payload: "method": "subscribe" plus "params": ["#);
        assert!(n.has_jsonrpc);
    }

    #[test]
    fn network_libraries_fixed_vocabulary() {
        let n = NetworkIndicators::scan("links NSURLSession and libcurl, not mycurlish");
        assert_eq!(n.network_libraries, vec!["NSURLSession", "libcurl"]);
    }

    #[test]
    fn backends_are_unique_union() {
        let corpus = "http://a.example.com/x http://a.example.com/x 10.1.2.3 b.example.org:80";
        let n = NetworkIndicators::scan(corpus);
        assert_eq!(
            n.backends,
            vec!["http://a.example.com/x", "b.example.org:80", "10.1.2.3"]
        );
        assert_eq!(n.sample_requests.len(), n.backends.len());
        assert!(n.sample_requests[0].contains("fetch('http://a.example.com/x'"));
        assert!(n.sample_requests[0].contains("'Content-Type': 'application/json'"));
    }

    #[test]
    fn scan_is_deterministic() {
        let corpus = "fetch('https://x.example.io/api/v1') eth_call 192.168.0.1:30303 graphql";
        let a = NetworkIndicators::scan(corpus);
        let b = NetworkIndicators::scan(corpus);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn bounded_view_truncates_by_insertion_order() {
        let corpus: String = (0..40)
            .map(|i| format!("https://host{i}.example.com/p "))
            .collect();
        let n = NetworkIndicators::scan(&corpus);
        assert_eq!(n.urls.len(), 40);
        let limits = ReportLimits::default();
        let bounded = n.bounded(&limits);
        assert_eq!(bounded.urls.len(), 30);
        assert_eq!(bounded.urls[0], "https://host0.example.com/p");
        assert_eq!(bounded.sample_requests.len(), 5);
        // internal sets remain unbounded
        assert_eq!(n.backends.len(), 40);
    }
}
