//! Aggregation primitives: bucketed accumulators, percentiles, rolling means
//!
//! These stand in for the group-by machinery a dataframe would provide.
//! Every grouping preserves first-appearance order of its keys so that later
//! stable sorts break ties the same way on every run.

use std::collections::HashMap;
use std::hash::Hash;

/// Single-pass running statistics (count, sum, mean, variance)
///
/// Variance uses Welford's update so large amounts don't lose precision.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    count: usize,
    sum: f64,
    mean: f64,
    m2: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean, undefined for an empty bucket
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Sample standard deviation (n - 1), undefined below two values
    pub fn sample_std(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let variance = (self.m2 / (self.count - 1) as f64).max(0.0);
        Some(variance.sqrt())
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::new();
        for v in iter {
            acc.push(v);
        }
        acc
    }
}

/// Group values into buckets keyed by `key`, in first-appearance order
pub fn group_by<T, K, F, V>(items: &[T], key: F, value: V) -> Vec<(K, Accumulator)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Accumulator)> = Vec::new();

    for item in items {
        let k = key(item);
        let slot = match index.get(&k) {
            Some(&i) => i,
            None => {
                index.insert(k.clone(), buckets.len());
                buckets.push((k, Accumulator::new()));
                buckets.len() - 1
            }
        };
        buckets[slot].1.push(value(item));
    }

    buckets
}

/// Sorted copy of the values (NaN-free input assumed)
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Percentile with linear interpolation between closest ranks
///
/// `q` is a fraction in [0, 1]; `sorted_values` must be ascending.
pub fn percentile(sorted_values: &[f64], q: f64) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted_values[lo] + (sorted_values[hi] - sorted_values[lo]) * frac)
}

pub fn median(sorted_values: &[f64]) -> Option<f64> {
    percentile(sorted_values, 0.5)
}

/// Last value of a trailing rolling mean over `window` points
///
/// Undefined when fewer than `window` points exist.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Round to a fixed number of decimal places (half away from zero)
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
