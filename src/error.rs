//! Error taxonomy for the trend analysis core.

/// Errors raised by the analyzer and its configuration layer.
///
/// Every analyzer operation fails fast with one of these instead of
/// returning a sentinel such as `NaN` or `0.0`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Fewer observations than the operation requires.
    #[error("need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Input is numerically degenerate for the requested algorithm.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A ratio's denominator is zero.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Goal target must be strictly positive.
    #[error("target percentage must be > 0, got {0}")]
    InvalidTarget(f64),

    /// Composite weight must lie in `[0, 1]`.
    #[error("weight must be within [0, 1], got {0}")]
    InvalidWeight(f64),

    /// An aggregate received no inputs.
    #[error("no inputs to aggregate")]
    EmptyInput,

    /// A time series violated its construction invariants.
    #[error("invalid series `{region}`: {reason}")]
    InvalidSeries { region: String, reason: String },

    /// A numeric parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// No target is configured for the region.
    #[error("no target configured for region `{0}`")]
    UnknownRegion(String),
}

/// Result alias for the analysis core.
pub type Result<T> = std::result::Result<T, AnalysisError>;
