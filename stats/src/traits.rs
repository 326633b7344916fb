use crate::error::StatsResult;

/// Contract shared by every derived-stat accumulator.
///
/// An accumulator is built once per tracked metric, fed one raw sample per
/// reporting cycle through [`update`](DerivedStat::update) and queried once
/// per cycle through [`fill_result`](DerivedStat::fill_result). State changes
/// only inside `update`; `fill_result` is read-only and its boolean tells the
/// caller whether the written result is worth publishing this cycle.
///
/// Annotation parsing is split from state construction so that keyed wrappers
/// can validate the shared annotation once and stamp out per-element
/// instances infallibly afterwards.
pub trait DerivedStat: Sized {
    /// Raw sample type fed in once per cycle.
    type Raw;
    /// Output written by `fill_result`.
    type Result;
    /// Parsed form of the per-instance annotation string.
    type Config: Clone;

    /// Parses and validates the annotation.
    fn parse_annotation(annotation: &str) -> StatsResult<Self::Config>;

    /// Builds a fresh accumulator from an already-validated config.
    fn with_config(config: Self::Config) -> Self;

    /// Folds one raw sample into the accumulator.
    fn update(&mut self, raw: &Self::Raw);

    /// Writes the current derived value into `res`.
    ///
    /// Returns `false` when there is nothing meaningful to report; the caller
    /// must then leave any previously published value alone.
    fn fill_result(&self, res: &mut Self::Result) -> bool;

    /// Parses `annotation` and builds the accumulator in one step.
    fn from_annotation(annotation: &str) -> StatsResult<Self> {
        Ok(Self::with_config(Self::parse_annotation(annotation)?))
    }
}
