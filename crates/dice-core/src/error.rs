//! Error types for dice operations.

/// Errors that can occur while rolling dice or generating scores.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A caller passed an argument of the wrong shape or value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation does not exist for this die's mode (roll on a coin, flip on a numeric die).
    #[error("cannot {operation} a {die}")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The die it was attempted on.
        die: String,
    },

    /// A die needs at least two sides.
    #[error("a die needs at least 2 sides, got {0}")]
    InvalidSides(u32),

    /// Ability set regeneration gave up before producing a set above the floor.
    #[error("gave up after {attempts} ability set regenerations")]
    RegenerationLimit {
        /// How many sets were discarded.
        attempts: u32,
    },

    /// No standard die is registered under this name.
    #[error("unknown die: {0}")]
    UnknownDie(String),
}

impl DiceError {
    /// Shorthand for an `UnsupportedOperation` on the given die.
    pub(crate) fn unsupported(operation: &'static str, die: impl std::fmt::Display) -> Self {
        Self::UnsupportedOperation {
            operation,
            die: die.to_string(),
        }
    }

    /// An `InvalidArgument` for a batch total that does not fit in a `u32`.
    pub(crate) fn total_overflow(count: u32, die: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!(
            "the total of {count} rolls of a {die} does not fit in a u32"
        ))
    }
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
