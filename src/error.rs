use thiserror::Error;

/// Errors raised while validating a billiard or aggregating its statistics.
///
/// All variants stem from static input (or an explicit cancellation), so none
/// of them are worth retrying with the same arguments.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BilliardError {
    /// Fewer than two axes were requested.
    #[error("dimension must be at least 2, got {0}")]
    InvalidDimension(usize),

    /// A tuple does not have the length implied by the requested dimension.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A side of length zero leaves the least common multiple undefined.
    #[error("side {axis} has length 0, the least common multiple is undefined")]
    ZeroSize { axis: usize },

    #[error("side {axis} has negative length {value}")]
    NegativeSize { axis: usize, value: i64 },

    /// The least common multiple of the sides does not fit the period counter.
    #[error("period of box {sizes:?} overflows")]
    PeriodOverflow { sizes: Vec<i64> },

    #[error("start coordinate {value} on axis {axis} is outside [0, {size}]")]
    StartOutOfRange { axis: usize, value: i64, size: i64 },

    #[error("axis {axis} does not exist in dimension {dimension}")]
    InvalidAxis { axis: usize, dimension: usize },

    #[error("no box face has id {0}")]
    UnknownFace(i32),

    #[error("no edge has index {0}")]
    UnknownEdge(usize),

    /// A multiplicity does not fit the fixed histogram buckets.
    #[error(
        "multiplicity {multiplicity} at {point:?} exceeds histogram capacity {capacity} \
         (box {sizes:?}, start {start:?})"
    )]
    MultiplicityOverflow {
        multiplicity: u32,
        capacity: usize,
        sizes: Vec<i64>,
        start: Vec<i64>,
        point: Vec<i64>,
    },

    #[error("computation cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BilliardError {
    /// True for dimension, length, range and sign problems in the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension(_)
                | Self::LengthMismatch { .. }
                | Self::NegativeSize { .. }
                | Self::StartOutOfRange { .. }
                | Self::InvalidAxis { .. }
                | Self::UnknownFace(_)
                | Self::UnknownEdge(_)
                | Self::Config(_)
        )
    }

    /// True when the box sizes make the period computation impossible.
    pub fn is_arithmetic_error(&self) -> bool {
        matches!(self, Self::ZeroSize { .. } | Self::PeriodOverflow { .. })
    }
}

impl From<serde_json::Error> for BilliardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BilliardError>;
