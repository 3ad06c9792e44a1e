use thiserror::Error;

/// Errors reported by the checked and fallible parts of the container API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Checked access past the last live element.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The requested slot count does not fit in a `Layout`.
    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("allocation of {capacity} slots failed")]
    AllocFailed { capacity: usize },
}
