//! Byte-entropy estimation.
//!
//! Shannon entropy over a 256-bin byte histogram, in [0, 8] bits per byte.
//! A companion qualitative band maps the value to a compression/encryption
//! likelihood for reporting.

use crate::triage::config::EntropyConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[inline]
pub fn entropy_of_slice(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut hist = [0usize; 256];
    for &b in data {
        hist[b as usize] += 1;
    }
    let len = data.len() as f64;
    let mut h = 0.0;
    for c in hist.iter().copied() {
        if c == 0 {
            continue;
        }
        let p = (c as f64) / len;
        h -= p * p.log2();
    }
    h
}

/// Entropy over a bounded prefix of the buffer.
pub fn sampled_entropy(data: &[u8], cfg: &EntropyConfig) -> f64 {
    let sample = match cfg.sample_cap {
        Some(cap) => &data[..data.len().min(cap)],
        None => data,
    };
    entropy_of_slice(sample)
}

/// Qualitative entropy band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl EntropyBand {
    /// Band thresholds: < 2 low, < 5 medium, < 7 high, >= 7 very high.
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy < 2.0 {
            EntropyBand::Low
        } else if entropy < 5.0 {
            EntropyBand::Medium
        } else if entropy < 7.0 {
            EntropyBand::High
        } else {
            EntropyBand::VeryHigh
        }
    }
}

impl fmt::Display for EntropyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntropyBand::Low => "Low - Easily compressible",
            EntropyBand::Medium => "Medium - Partially compressed",
            EntropyBand::High => "High - Well compressed",
            EntropyBand::VeryHigh => "Very High - Already compressed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_constant_buffer_is_zero() {
        let data = vec![0x41u8; 4096];
        let h = entropy_of_slice(&data);
        assert!(h < 1e-9);
    }

    #[test]
    fn entropy_of_uniform_bytes_approaches_eight() {
        // Every byte value equally represented
        let data: Vec<u8> = (0..4096).map(|i| (i % 256) as u8).collect();
        let h = entropy_of_slice(&data);
        assert!((h - 8.0).abs() < 1e-9, "entropy was {}", h);
    }

    #[test]
    fn entropy_is_bounded() {
        let mut rng = 123456789u64;
        let data: Vec<u8> = (0..1 << 14)
            .map(|_| {
                rng = rng.wrapping_mul(1664525).wrapping_add(1013904223);
                (rng >> 24) as u8
            })
            .collect();
        let h = entropy_of_slice(&data);
        assert!(h >= 0.0);
        assert!(h <= 8.0 + 1e-9);
    }

    #[test]
    fn empty_buffer_is_zero() {
        assert_eq!(entropy_of_slice(&[]), 0.0);
    }

    #[test]
    fn sample_cap_bounds_the_scan() {
        // Low-entropy prefix, high-entropy tail; the cap hides the tail
        let mut data = vec![b'A'; 1024];
        let mut rng = 42u64;
        for _ in 0..4096 {
            rng = rng.wrapping_mul(1664525).wrapping_add(1013904223);
            data.push((rng >> 24) as u8);
        }
        let cfg = EntropyConfig {
            sample_cap: Some(1024),
        };
        let h = sampled_entropy(&data, &cfg);
        assert!(h < 1e-9);
        let cfg_full = EntropyConfig { sample_cap: None };
        assert!(sampled_entropy(&data, &cfg_full) > 1.0);
    }

    #[test]
    fn bands_match_thresholds() {
        assert_eq!(EntropyBand::from_entropy(0.0), EntropyBand::Low);
        assert_eq!(EntropyBand::from_entropy(1.99), EntropyBand::Low);
        assert_eq!(EntropyBand::from_entropy(2.0), EntropyBand::Medium);
        assert_eq!(EntropyBand::from_entropy(4.99), EntropyBand::Medium);
        assert_eq!(EntropyBand::from_entropy(5.0), EntropyBand::High);
        assert_eq!(EntropyBand::from_entropy(7.0), EntropyBand::VeryHigh);
        assert_eq!(EntropyBand::from_entropy(8.0), EntropyBand::VeryHigh);
    }
}
