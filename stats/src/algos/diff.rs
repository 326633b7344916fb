use derived_stats_common::DeltaValue;
use num_traits::Zero;

use crate::error::StatsResult;
use crate::traits::DerivedStat;

/// Delta between the current and the previous raw sample.
///
/// The first sample is reported as-is, a delta against an implicit zero
/// baseline; cumulative counters that begin life at zero bootstrap this way.
#[derive(Debug, Clone)]
pub struct Diff<T> {
    state: Option<DiffState<T>>,
}

#[derive(Debug, Clone)]
struct DiffState<T> {
    aggregate: T,
    last_diff: T,
}

impl<T: DeltaValue> DerivedStat for Diff<T> {
    type Raw = T;
    type Result = T;
    type Config = ();

    fn parse_annotation(_annotation: &str) -> StatsResult<()> {
        Ok(())
    }

    fn with_config(_config: ()) -> Self {
        Self { state: None }
    }

    fn update(&mut self, raw: &T) {
        match self.state.as_mut() {
            None => {
                self.state = Some(DiffState {
                    aggregate: raw.clone(),
                    last_diff: raw.clone(),
                });
            }
            Some(state) => {
                state.last_diff = raw.clone() - state.aggregate.clone();
                state.aggregate = raw.clone();
            }
        }
    }

    fn fill_result(&self, res: &mut T) -> bool {
        match &self.state {
            Some(state) if !state.last_diff.is_zero() => {
                res.clone_from(&state.last_diff);
                true
            }
            _ => false,
        }
    }
}
