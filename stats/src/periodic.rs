use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::StatsResult;
use crate::instance::StatsMap;
use crate::traits::DerivedStat;

/// Result published around a period boundary: what the previous period
/// closed with, and what the in-progress period has so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicResult<R> {
    pub previous: Option<R>,
    pub current: Option<R>,
}

impl<R> Default for PeriodicResult<R> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
        }
    }
}

/// Single-value accumulator with period semantics.
///
/// [`flush`](PeriodicCell::flush) closes the current period: its result is
/// cached as `previous` and the accumulator is discarded, so the next update
/// starts a fresh period. A flush with no intervening updates clears the
/// cache as well.
pub struct PeriodicCell<A: DerivedStat> {
    config: A::Config,
    current: Option<A>,
    cache: Option<A::Result>,
}

impl<A: DerivedStat> PeriodicCell<A> {
    pub fn new(annotation: &str) -> StatsResult<Self> {
        Ok(Self {
            config: A::parse_annotation(annotation)?,
            current: None,
            cache: None,
        })
    }

    pub fn update(&mut self, raw: &A::Raw) {
        self.current
            .get_or_insert_with(|| A::with_config(self.config.clone()))
            .update(raw);
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some() || self.cache.is_some()
    }

    /// Closes the current period. Returns whether a previous-period result is
    /// now cached.
    pub fn flush(&mut self) -> bool
    where
        A::Result: Default,
    {
        self.cache = self.current.take().and_then(|algo| {
            let mut res = A::Result::default();
            algo.fill_result(&mut res).then_some(res)
        });
        self.cache.is_some()
    }

    pub fn fill_result(&self, res: &mut PeriodicResult<A::Result>) -> bool
    where
        A::Result: Default + Clone,
    {
        res.previous = self.cache.clone();
        res.current = self.current.as_ref().and_then(|algo| {
            let mut out = A::Result::default();
            algo.fill_result(&mut out).then_some(out)
        });
        res.previous.is_some() || res.current.is_some()
    }
}

/// Keyed accumulators with period semantics.
///
/// Updates follow the [`StatsMap`] merge rules; a flush swaps every
/// element's result into the previous-period cache and starts all elements
/// over.
pub struct PeriodicMap<A: DerivedStat> {
    config: A::Config,
    current: StatsMap<A>,
    cache: AHashMap<String, A::Result>,
}

impl<A: DerivedStat> PeriodicMap<A> {
    pub fn new(annotation: &str) -> StatsResult<Self> {
        let config = A::parse_annotation(annotation)?;
        Ok(Self {
            current: StatsMap::with_config(config.clone()),
            config,
            cache: AHashMap::new(),
        })
    }

    pub fn update(&mut self, raw: &AHashMap<String, A::Raw>) {
        self.current.update(raw);
    }

    pub fn has_result(&self) -> bool {
        !self.current.is_empty() || !self.cache.is_empty()
    }

    /// Closes the current period for every element. Returns whether any
    /// element's result is now cached.
    pub fn flush(&mut self) -> bool
    where
        A::Result: Default,
    {
        self.current.fill_result(&mut self.cache);
        self.current = StatsMap::with_config(self.config.clone());
        !self.cache.is_empty()
    }

    /// Merges the previous-period cache with the in-progress results, one
    /// [`PeriodicResult`] per element seen on either side.
    pub fn fill_result(&self, res: &mut AHashMap<String, PeriodicResult<A::Result>>) -> bool
    where
        A::Result: Default + Clone,
    {
        res.clear();
        for (key, prev) in &self.cache {
            res.insert(
                key.clone(),
                PeriodicResult {
                    previous: Some(prev.clone()),
                    current: None,
                },
            );
        }

        let mut in_progress = AHashMap::new();
        self.current.fill_result(&mut in_progress);
        for (key, cur) in in_progress {
            res.entry(key).or_default().current = Some(cur);
        }
        !res.is_empty()
    }
}
