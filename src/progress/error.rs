//! Error type for progress state transitions

/// Rejection raised by the progress engine.
///
/// The engine performs no I/O, so the only way an operation can fail is a
/// bad argument. The record passed in is left untouched whenever this is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProgressError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
