//! Streaming derived statistics for telemetry sample streams.
//!
//! A monitored metric reports one raw value per cycle. Each accumulator in
//! [`algos`] reduces that stream to a secondary metric: per-category counter
//! deltas, an exponentially weighted mean/variance, the latest value, a
//! previous/current diff, or a sum/average over an optionally bounded sliding
//! window. All of them share the [`DerivedStat`] contract: state moves only
//! inside [`update`](DerivedStat::update), and
//! [`fill_result`](DerivedStat::fill_result) reports whether there is
//! anything worth publishing this cycle.
//!
//! The wrapper layers add the per-metric plumbing: [`StatsCell`] holds
//! results back until the first sample, [`StatsMap`] keys independent
//! accumulators by element name, and [`PeriodicCell`]/[`PeriodicMap`] flush
//! results at period boundaries into a previous/current pair.

pub use error::{StatsError, StatsResult};
pub use instance::{StatsCell, StatsMap};
pub use periodic::{PeriodicCell, PeriodicMap, PeriodicResult};
pub use results::{CategoryResult, EwmResult, NullResult};
pub use traits::DerivedStat;

pub mod algos;
mod error;
mod instance;
mod periodic;
mod results;
mod traits;
