use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Per-category deltas computed by
/// [`CategoryCount`](crate::algos::CategoryCount) over one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub counters: AHashMap<String, u64>,
}

/// Exponentially weighted moving statistics of a scalar stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EwmResult {
    pub samples: u64,
    pub mean: f64,
    pub stddev: f64,
    /// Standard deviations the latest sample lies from the current mean.
    pub sigma: f64,
}

/// Latest raw value recorded by [`Passthrough`](crate::algos::Passthrough).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NullResult<T> {
    pub samples: u64,
    pub value: T,
}
