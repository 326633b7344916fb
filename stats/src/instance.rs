use ahash::AHashMap;
use tracing::debug;

use crate::error::StatsResult;
use crate::traits::DerivedStat;

/// Per-metric wrapper around a single accumulator.
///
/// The annotation is validated up front, and results are held back until the
/// first raw sample has been folded in, so a freshly configured metric never
/// publishes a default value.
#[derive(Debug, Clone)]
pub struct StatsCell<A> {
    algo: A,
    updated: bool,
}

impl<A: DerivedStat> StatsCell<A> {
    pub fn new(annotation: &str) -> StatsResult<Self> {
        Ok(Self {
            algo: A::from_annotation(annotation)?,
            updated: false,
        })
    }

    pub fn update(&mut self, raw: &A::Raw) {
        self.algo.update(raw);
        self.updated = true;
    }

    /// Whether at least one sample has been folded in.
    pub fn has_result(&self) -> bool {
        self.updated
    }

    pub fn fill_result(&self, res: &mut A::Result) -> bool {
        self.updated && self.algo.fill_result(res)
    }
}

/// Keyed wrapper for raw stats whose value is a map of named elements.
///
/// Every element gets its own accumulator, built from the one annotation the
/// map was configured with. Elements appear on first sight, elements absent
/// from an update are left untouched, and an empty raw map is a broadcast
/// delete that drops all element state.
pub struct StatsMap<A: DerivedStat> {
    config: A::Config,
    elems: AHashMap<String, A>,
}

impl<A: DerivedStat> StatsMap<A> {
    pub fn new(annotation: &str) -> StatsResult<Self> {
        Ok(Self::with_config(A::parse_annotation(annotation)?))
    }

    pub(crate) fn with_config(config: A::Config) -> Self {
        Self {
            config,
            elems: AHashMap::new(),
        }
    }

    pub fn update(&mut self, raw: &AHashMap<String, A::Raw>) {
        if raw.is_empty() {
            if !self.elems.is_empty() {
                debug!(
                    elements = self.elems.len(),
                    "empty raw map, dropping all element state"
                );
            }
            self.elems.clear();
            return;
        }
        for (key, sample) in raw {
            self.elems
                .entry(key.clone())
                .or_insert_with(|| A::with_config(self.config.clone()))
                .update(sample);
        }
    }

    /// Drops the accumulator for one element.
    pub fn remove(&mut self, key: &str) -> bool {
        self.elems.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Fills one result per element that has something to report; `true` iff
    /// the output map ends up non-empty.
    pub fn fill_result(&self, res: &mut AHashMap<String, A::Result>) -> bool
    where
        A::Result: Default,
    {
        res.clear();
        for (key, algo) in &self.elems {
            let mut elem_res = A::Result::default();
            if algo.fill_result(&mut elem_res) {
                res.insert(key.clone(), elem_res);
            }
        }
        !res.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::algos::{Diff, ExponentialMovingStats, WindowedSum};
    use crate::error::StatsError;
    use crate::results::EwmResult;

    use super::*;

    fn raw(entries: &[(&str, u64)]) -> AHashMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn cell_holds_results_back_until_the_first_update() {
        // The accumulator itself would report from cycle zero.
        let mut cell = StatsCell::<ExponentialMovingStats<f64>>::new("0.5").unwrap();
        let mut res = EwmResult::default();
        assert!(!cell.has_result());
        assert!(!cell.fill_result(&mut res));

        cell.update(&10.0);
        assert!(cell.has_result());
        assert!(cell.fill_result(&mut res));
        assert_eq!(res.mean, 5.0);
    }

    #[test]
    fn cell_construction_fails_fast_on_a_bad_annotation() {
        let err = StatsCell::<ExponentialMovingStats<f64>>::new("5").unwrap_err();
        assert_eq!(err, StatsError::InvalidAlpha("5".to_string()));
    }

    #[test]
    fn map_keeps_one_accumulator_per_element() {
        let mut map = StatsMap::<WindowedSum<u64>>::new("2").unwrap();
        map.update(&raw(&[("rx", 1), ("tx", 10)]));
        map.update(&raw(&[("rx", 2), ("tx", 20)]));
        map.update(&raw(&[("rx", 4)]));

        let mut res = AHashMap::new();
        assert!(map.fill_result(&mut res));
        // rx covers its last two samples; tx was untouched this cycle.
        assert_eq!(res, raw(&[("rx", 6), ("tx", 30)]));
    }

    #[test]
    fn empty_raw_map_drops_all_element_state() {
        let mut map = StatsMap::<WindowedSum<u64>>::new("").unwrap();
        map.update(&raw(&[("rx", 1)]));
        assert_eq!(map.len(), 1);

        map.update(&raw(&[]));
        assert!(map.is_empty());
        let mut res = AHashMap::new();
        assert!(!map.fill_result(&mut res));

        // A reappearing element starts from scratch.
        map.update(&raw(&[("rx", 7)]));
        assert!(map.fill_result(&mut res));
        assert_eq!(res, raw(&[("rx", 7)]));
    }

    #[test]
    fn remove_drops_a_single_element() {
        let mut map = StatsMap::<WindowedSum<u64>>::new("").unwrap();
        map.update(&raw(&[("rx", 1), ("tx", 2)]));
        assert!(map.remove("rx"));
        assert!(!map.remove("rx"));

        let mut res = AHashMap::new();
        assert!(map.fill_result(&mut res));
        assert_eq!(res, raw(&[("tx", 2)]));
    }

    #[test]
    fn map_result_omits_elements_with_nothing_to_report() {
        let mut map = StatsMap::<Diff<u64>>::new("").unwrap();
        map.update(&raw(&[("a", 5), ("b", 3)]));
        map.update(&raw(&[("a", 5), ("b", 9)]));

        // "a" did not move, so only "b" reports a delta.
        let mut res = AHashMap::new();
        assert!(map.fill_result(&mut res));
        assert_eq!(res, raw(&[("b", 6)]));
    }

    #[test]
    fn map_construction_fails_fast_on_a_bad_annotation() {
        assert_eq!(
            StatsMap::<WindowedSum<u64>>::new("0").err(),
            Some(StatsError::InvalidWindow("0".to_string()))
        );
    }
}
