//! Error types for the JSFiddle HTTP client

use thiserror::Error;

/// Errors that can occur when using the JSFiddle HTTP client
#[derive(Error, Debug)]
pub enum FiddleError {
    /// The primary argument has the wrong shape (not a string or object, or empty)
    #[error("{0}")]
    InvalidArgument(String),

    /// Fetching by structured descriptor is not supported
    #[error("Not yet implemented")]
    NotImplemented,

    /// HTTP request failed, passed through from the transport unchanged
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The remote answered with a status code other than 200
    #[error("{message}")]
    Status {
        /// The status code that was received
        status_code: u16,
        /// Human readable message embedding the status code
        message: String,
    },

    /// Client initialization or URL construction failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl FiddleError {
    /// Status code of a [`FiddleError::Status`] error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FiddleError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_is_message() {
        let err = FiddleError::Status {
            status_code: 404,
            message: "responded with 404".to_string(),
        };
        assert_eq!(err.to_string(), "responded with 404");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_not_implemented_message() {
        assert_eq!(FiddleError::NotImplemented.to_string(), "Not yet implemented");
        assert_eq!(FiddleError::NotImplemented.status_code(), None);
    }
}
