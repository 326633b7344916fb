use thiserror::Error;

pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised while constructing an accumulator from its annotation.
///
/// Construction fails fast: an accumulator with a rejected annotation is
/// never produced, and nothing is silently defaulted.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum StatsError {
    #[error("invalid smoothing factor `{0}`: expected a decimal in (0, 1)")]
    InvalidAlpha(String),
    #[error("invalid window length `{0}`: expected an integer >= 1")]
    InvalidWindow(String),
}
