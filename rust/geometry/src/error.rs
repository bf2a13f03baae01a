use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Business-rule violations on well-formed input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplittingError {
    #[error("The building limits must not overlap with themselves")]
    BuildingLimitsOverlap,

    #[error("The height plateaus must not overlap with themselves")]
    HeightPlateausOverlap,

    #[error("The height plateaus do not completely cover the building limits")]
    NotCovering,
}

/// Errors that can occur while splitting
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Splitting(#[from] SplittingError),

    /// The kernel produced a line or point where only polygons are valid.
    /// Points at a tolerance mismatch, never at the caller.
    #[error("Unexpected geometry type {0} in split results")]
    UnexpectedGeometry(&'static str),

    #[error("Data model error: {0}")]
    CoreError(#[from] archsplit_core::Error),
}
