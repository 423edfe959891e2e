//! Error types for geometry construction

/// Errors raised when a generator is asked for invalid geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("subdivision depth {depth} exceeds the supported maximum of {max}")]
    DepthTooDeep { depth: u32, max: u32 },

    #[error("a disc needs at least 3 sides, got {0}")]
    TooFewSides(u32),
}

/// Result type alias for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
