//! Numeric interval bucketing.
//!
//! Converts a half-open `[min, max)` range into equal-width named buckets
//! and classifies values into them. These functions are total: every input
//! produces a defined output and nothing here panics.

use serde::{Deserialize, Serialize};

/// Number of buckets a numeric dimension is discretized into, system-wide.
pub const BUCKET_COUNT: usize = 10;

/// A half-open numeric range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a value falls inside `[min, max)`
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

/// One half-open sub-range of a bucketed interval, with a display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub min: f64,
    pub max: f64,
    /// Display label, `"{min} - {max}"` with bounds rounded to at most two
    /// fractional digits. Boundary math uses the full-precision bounds.
    pub name: String,
}

/// Split `interval` into `bucket_count` equal-width, contiguous, ascending
/// buckets covering `[min, max)`.
pub fn make_buckets(interval: Interval, bucket_count: usize) -> Vec<Bucket> {
    if bucket_count == 0 {
        return Vec::new();
    }
    let width = (interval.max - interval.min) / bucket_count as f64;
    (0..bucket_count)
        .map(|i| {
            let min = interval.min + width * i as f64;
            // The last bucket closes exactly on the interval max rather than
            // on an accumulated sum, so the partition always covers the range.
            let max = if i + 1 == bucket_count { interval.max } else { interval.min + width * (i + 1) as f64 };
            Bucket { min, max, name: format!("{} - {}", format_bound(min), format_bound(max)) }
        })
        .collect()
}

/// Index of the first bucket whose `[min, max)` range contains `value`.
///
/// Values at or above the global maximum land in the last bucket: the upper
/// bound is half-open, so the maximum itself belongs nowhere and is assigned
/// to the top bucket by policy. Values below the global minimum clamp to the
/// first bucket, symmetrically.
pub fn classify(value: f64, buckets: &[Bucket]) -> usize {
    if buckets.is_empty() {
        return 0;
    }
    buckets
        .iter()
        .position(|b| b.min <= value && value < b.max)
        .unwrap_or(if value < buckets[0].min { 0 } else { buckets.len() - 1 })
}

/// Round a bound to at most two fractional digits for display
fn format_bound(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Collapse -0 to 0 so labels never read "-0 - ..."
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
