use thiserror::Error;

use crate::common::error::SchedulerError::{GenericError, InvalidArgument};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Submission failed: {0}")]
    SubmissionFailure(String),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<anyhow::Error> for SchedulerError {
    fn from(error: anyhow::Error) -> Self {
        Self::GenericError(error.to_string())
    }
}

impl From<String> for SchedulerError {
    fn from(e: String) -> Self {
        GenericError(e)
    }
}

pub fn invalid_argument<T>(message: String) -> crate::Result<T> {
    Err(InvalidArgument(message))
}

#[cfg(test)]
mod tests {
    use crate::common::error::SchedulerError;

    #[test]
    fn test_from_string() {
        let error = SchedulerError::from("cannot continue".to_string());
        assert!(matches!(error, SchedulerError::GenericError(_)));
        assert_eq!(error.to_string(), "Error: cannot continue");
    }

    #[test]
    fn test_from_anyhow_keeps_context() {
        let error: SchedulerError = anyhow::anyhow!("inner")
            .context("outer")
            .into();
        assert_eq!(error.to_string(), "Error: outer");
    }
}
