use thiserror::Error;

/// Faults raised by the fretboard pipeline.
///
/// Non-detection is never an error: stages that find nothing propagate an
/// empty result and the detector returns `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FretboardError {
    /// Empty, zero-area or inconsistently sized image input.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl FretboardError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
