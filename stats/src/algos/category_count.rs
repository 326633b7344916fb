use ahash::AHashMap;
use tracing::warn;

use crate::error::StatsResult;
use crate::results::CategoryResult;
use crate::traits::DerivedStat;

/// Per-category delta over a map of monotonically non-decreasing counters.
///
/// Each update reports, per category, how much the raw counter advanced since
/// the previous cycle; categories whose counter did not move are omitted from
/// the diff. The aggregate keeps one entry per distinct category ever
/// observed and never shrinks, so an unbounded category domain grows it
/// without limit; bound the domain externally when planning capacity.
///
/// A counter that moves backwards has reset since the last cycle. The
/// aggregate is reseeded from the new value, the full value is reported as
/// the delta and diffing resumes normally; the occurrence is counted and
/// logged rather than treated as fatal.
#[derive(Debug, Clone, Default)]
pub struct CategoryCount {
    aggregate: AHashMap<String, u64>,
    diff: AHashMap<String, u64>,
    resets: u64,
}

impl CategoryCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counter resets observed so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl DerivedStat for CategoryCount {
    type Raw = AHashMap<String, u64>;
    type Result = CategoryResult;
    type Config = ();

    fn parse_annotation(_annotation: &str) -> StatsResult<()> {
        Ok(())
    }

    fn with_config(_config: ()) -> Self {
        Self::default()
    }

    fn update(&mut self, raw: &Self::Raw) {
        // The diff covers a single cycle; it never accumulates.
        self.diff.clear();
        for (category, &value) in raw {
            if value == 0 {
                continue;
            }
            match self.aggregate.get_mut(category) {
                None => {
                    // First sighting: the whole value counts as the delta.
                    self.diff.insert(category.clone(), value);
                    self.aggregate.insert(category.clone(), value);
                }
                Some(prev) if value >= *prev => {
                    let delta = value - *prev;
                    if delta != 0 {
                        self.diff.insert(category.clone(), delta);
                        *prev = value;
                    }
                }
                Some(prev) => {
                    warn!(
                        category = category.as_str(),
                        previous = *prev,
                        value,
                        "counter moved backwards, treating as a reset"
                    );
                    self.resets += 1;
                    *prev = value;
                    self.diff.insert(category.clone(), value);
                }
            }
        }
    }

    fn fill_result(&self, res: &mut CategoryResult) -> bool {
        res.counters.clone_from(&self.diff);
        !self.diff.is_empty()
    }
}
