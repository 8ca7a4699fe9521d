use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The dynamic-programming table for `cities` cities would need `bytes`
    /// bytes (saturated at `usize::MAX` when the size itself overflows).
    #[error("resource exhausted: table for {cities} cities needs {bytes} bytes")]
    ResourceExhausted { cities: usize, bytes: usize },

    #[error("solve was cancelled")]
    Cancelled,

    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

impl TspError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        TspError::InvalidInput(message.into())
    }
}
