use derived_stats_common::WindowValue;
use num_traits::ToPrimitive;

use crate::error::{StatsError, StatsResult};
use crate::traits::DerivedStat;

/// Window length parsed from an annotation: empty means unbounded, anything
/// else must be an integer >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLen(u64);

impl WindowLen {
    pub const UNBOUNDED: WindowLen = WindowLen(0);

    pub fn parse(annotation: &str) -> StatsResult<Self> {
        let annotation = annotation.trim();
        if annotation.is_empty() {
            return Ok(Self::UNBOUNDED);
        }
        match annotation.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(WindowLen(n)),
            _ => Err(StatsError::InvalidWindow(annotation.to_string())),
        }
    }
}

/// Constant-memory sliding accumulator shared by [`WindowedSum`] and
/// [`WindowedAverage`].
///
/// With a bound of `n`, `history` is a circular buffer of the `n` most recent
/// samples. Each overwritten slot is first subtracted from the running total,
/// so once `n` samples have arrived the total covers exactly the last `n`
/// values. Unbounded accumulators never allocate history.
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    window: u64,
    samples: u64,
    total: Option<T>,
    history: Vec<T>,
}

impl<T: WindowValue> SlidingWindow<T> {
    pub fn new(window: WindowLen) -> Self {
        Self {
            window: window.0,
            samples: 0,
            total: None,
            history: Vec::with_capacity(window.0 as usize),
        }
    }

    pub fn update(&mut self, raw: T) {
        self.total = Some(match self.total {
            None => raw,
            Some(total) => total + raw,
        });
        if self.window > 0 {
            let slot = (self.samples % self.window) as usize;
            if self.samples >= self.window {
                // The slot holds the sample falling out of the window;
                // evict it from the total before overwriting.
                if let Some(total) = self.total.as_mut() {
                    *total = *total - self.history[slot];
                }
                self.history[slot] = raw;
            } else {
                self.history.push(raw);
            }
        }
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Running total, `None` until the first sample arrives.
    pub fn total(&self) -> Option<T> {
        self.total
    }

    /// Number of samples the total currently covers.
    pub fn effective_window(&self) -> u64 {
        if self.window > 0 {
            self.samples.min(self.window)
        } else {
            self.samples
        }
    }
}

/// Running sum, optionally bounded to the most recent `n` samples.
#[derive(Debug, Clone)]
pub struct WindowedSum<T> {
    window: SlidingWindow<T>,
}

impl<T: WindowValue> DerivedStat for WindowedSum<T> {
    type Raw = T;
    type Result = T;
    type Config = WindowLen;

    fn parse_annotation(annotation: &str) -> StatsResult<WindowLen> {
        WindowLen::parse(annotation)
    }

    fn with_config(config: WindowLen) -> Self {
        Self {
            window: SlidingWindow::new(config),
        }
    }

    fn update(&mut self, raw: &T) {
        self.window.update(*raw);
    }

    fn fill_result(&self, res: &mut T) -> bool {
        match self.window.total() {
            Some(total) => {
                *res = total;
                true
            }
            None => false,
        }
    }
}

/// Mean over the same window as [`WindowedSum`].
///
/// Shares the sliding accumulator and differs only in finalization: the total
/// is divided by the number of samples the window currently covers.
#[derive(Debug, Clone)]
pub struct WindowedAverage<T> {
    window: SlidingWindow<T>,
}

impl<T: WindowValue + ToPrimitive> DerivedStat for WindowedAverage<T> {
    type Raw = T;
    type Result = f64;
    type Config = WindowLen;

    fn parse_annotation(annotation: &str) -> StatsResult<WindowLen> {
        WindowLen::parse(annotation)
    }

    fn with_config(config: WindowLen) -> Self {
        Self {
            window: SlidingWindow::new(config),
        }
    }

    fn update(&mut self, raw: &T) {
        self.window.update(*raw);
    }

    fn fill_result(&self, res: &mut f64) -> bool {
        let Some(total) = self.window.total() else {
            return false;
        };
        *res = total.to_f64().unwrap_or(f64::NAN) / self.window.effective_window() as f64;
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use super::*;

    fn sum_of(stat: &WindowedSum<i64>) -> Option<i64> {
        let mut res = 0;
        stat.fill_result(&mut res).then_some(res)
    }

    #[test_case("0"; "zero")]
    #[test_case("abc"; "unparsable")]
    #[test_case("-1"; "negative")]
    #[test_case("2.5"; "fractional")]
    fn construction_rejects_bad_windows(annotation: &str) {
        assert_eq!(
            WindowedSum::<i64>::from_annotation(annotation).unwrap_err(),
            StatsError::InvalidWindow(annotation.to_string()),
        );
    }

    #[test]
    fn empty_annotation_means_unbounded() {
        let mut stat = WindowedSum::<i64>::from_annotation("").unwrap();
        assert_eq!(sum_of(&stat), None);

        let values = [3, -1, 10, 7, 7, 100];
        for (i, v) in values.iter().enumerate() {
            stat.update(v);
            assert_eq!(sum_of(&stat), Some(values[..=i].iter().sum()));
        }
    }

    #[test]
    fn bounded_sum_covers_exactly_the_last_n_samples() {
        let mut stat = WindowedSum::<i64>::from_annotation("3").unwrap();
        for v in 1..=5 {
            stat.update(&v);
        }
        assert_eq!(sum_of(&stat), Some(12));
    }

    #[test]
    fn bounded_sum_while_the_buffer_is_still_filling() {
        let mut stat = WindowedSum::<i64>::from_annotation("3").unwrap();
        stat.update(&1);
        assert_eq!(sum_of(&stat), Some(1));
        stat.update(&2);
        assert_eq!(sum_of(&stat), Some(3));
        stat.update(&3);
        assert_eq!(sum_of(&stat), Some(6));
    }

    #[test]
    fn window_of_one_tracks_the_latest_sample() {
        let mut stat = WindowedSum::<i64>::from_annotation("1").unwrap();
        for v in [5, 9, 2] {
            stat.update(&v);
            assert_eq!(sum_of(&stat), Some(v));
        }
    }

    #[test]
    fn windowed_total_matches_naive_recomputation() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for window in [1u64, 2, 3, 7, 16] {
            let mut stat = WindowedSum::<i64>::from_annotation(&window.to_string()).unwrap();
            let mut fed: Vec<i64> = Vec::new();
            for _ in 0..100 {
                let v = rng.gen_range(-1000..1000);
                fed.push(v);
                stat.update(&v);

                let start = fed.len().saturating_sub(window as usize);
                let want: i64 = fed[start..].iter().sum();
                assert_eq!(sum_of(&stat), Some(want), "window {window}");
            }
        }
    }

    #[test]
    fn history_capacity_is_fixed_at_construction() {
        let mut stat = WindowedSum::<i64>::from_annotation("4").unwrap();
        for v in 0..1000 {
            stat.update(&v);
        }
        assert!(stat.window.history.capacity() <= 4);
        assert_eq!(stat.window.effective_window(), 4);
    }

    #[test]
    fn average_divides_by_the_effective_window() {
        let mut stat = WindowedAverage::<i64>::from_annotation("3").unwrap();
        let mut res = 0.0;
        assert!(!stat.fill_result(&mut res));

        // Still filling: divide by the sample count, not the bound.
        stat.update(&1);
        stat.update(&2);
        assert!(stat.fill_result(&mut res));
        assert_eq!(res, 1.5);

        for v in 3..=5 {
            stat.update(&v);
        }
        assert!(stat.fill_result(&mut res));
        assert_eq!(res, 4.0);
    }

    #[test]
    fn unbounded_average_divides_by_the_sample_count() {
        let mut stat = WindowedAverage::<f64>::from_annotation("").unwrap();
        for v in [1.0, 2.0, 6.0] {
            stat.update(&v);
        }
        let mut res = 0.0;
        assert!(stat.fill_result(&mut res));
        assert_eq!(res, 3.0);
    }
}
