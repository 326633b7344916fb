use std::marker::PhantomData;

use derived_stats_common::SmoothValue;
use num_traits::ToPrimitive;

use crate::error::{StatsError, StatsResult};
use crate::results::EwmResult;
use crate::traits::DerivedStat;

/// Validated smoothing factor in the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alpha(f64);

impl Alpha {
    pub fn parse(annotation: &str) -> StatsResult<Self> {
        let alpha = annotation
            .trim()
            .parse::<f64>()
            .map_err(|_| StatsError::InvalidAlpha(annotation.to_string()))?;
        // The negated comparison also rejects NaN.
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(StatsError::InvalidAlpha(annotation.to_string()));
        }
        Ok(Alpha(alpha))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Exponentially weighted moving mean, variance and z-score.
///
/// `alpha` weights the newest sample. The variance advances against the mean
/// of the previous cycle before the mean itself moves; the update order is
/// load-bearing.
#[derive(Debug, Clone)]
pub struct ExponentialMovingStats<T> {
    alpha: f64,
    mean: f64,
    variance: f64,
    stddev: f64,
    sigma: f64,
    samples: u64,
    _raw: PhantomData<T>,
}

impl<T: SmoothValue> DerivedStat for ExponentialMovingStats<T> {
    type Raw = T;
    type Result = EwmResult;
    type Config = Alpha;

    fn parse_annotation(annotation: &str) -> StatsResult<Alpha> {
        Alpha::parse(annotation)
    }

    fn with_config(config: Alpha) -> Self {
        Self {
            alpha: config.get(),
            mean: 0.0,
            variance: 0.0,
            stddev: 0.0,
            sigma: 0.0,
            samples: 0,
            _raw: PhantomData,
        }
    }

    fn update(&mut self, raw: &T) {
        let x = raw.to_f64().unwrap_or(f64::NAN);
        self.samples += 1;
        self.variance =
            (1.0 - self.alpha) * (self.variance + self.alpha * (x - self.mean).powi(2));
        self.mean = (1.0 - self.alpha) * self.mean + self.alpha * x;
        self.stddev = self.variance.sqrt();
        self.sigma = if self.stddev != 0.0 {
            (x - self.mean) / self.stddev
        } else {
            0.0
        };
    }

    fn fill_result(&self, res: &mut EwmResult) -> bool {
        res.samples = self.samples;
        res.mean = self.mean;
        res.stddev = self.stddev;
        res.sigma = self.sigma;
        true
    }
}
