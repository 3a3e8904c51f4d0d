//! Upstream fetch errors.

use sessionbars_types::ConfigurationError;
use thiserror::Error;

/// Errors that abort the fetch of one symbol's trades.
///
/// Page indices are zero-based. Callers retry the whole symbol rather than
/// resuming mid-cursor: the cursor is provider-opaque and is not assumed to
/// survive a failed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFetchError {
    /// The provider answered a page request with a non-success status.
    #[error("Upstream returned status {status} for page {page}")]
    Status {
        /// Index of the failed page.
        page: usize,
        /// HTTP status code.
        status: u16,
    },

    /// The page request never produced a response.
    #[error("Request for page {page} failed: {message}")]
    Transport {
        /// Index of the failed page.
        page: usize,
        /// Description of the transport failure.
        message: String,
    },

    /// The page body could not be decoded.
    #[error("Could not decode page {page}: {message}")]
    Decode {
        /// Index of the failed page.
        page: usize,
        /// Description of the decoding failure.
        message: String,
    },

    /// The fetch was configured incorrectly.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl UpstreamFetchError {
    /// Returns the index of the page that failed, if any.
    #[must_use]
    pub const fn page(&self) -> Option<usize> {
        match self {
            Self::Status { page, .. } | Self::Transport { page, .. } | Self::Decode { page, .. } => {
                Some(*page)
            }
            Self::Configuration(_) => None,
        }
    }

    /// Returns the upstream HTTP status, if the provider answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if retrying the symbol's fetch may succeed.
    ///
    /// Rate limiting (429), server errors (5xx), and transport failures are
    /// retryable; client errors, decoding failures, and configuration errors
    /// are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } => true,
            Self::Decode { .. } | Self::Configuration(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_status_accessors() {
        let err = UpstreamFetchError::Status { page: 3, status: 503 };
        assert_eq!(err.page(), Some(3));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Upstream returned status 503 for page 3");

        let err = UpstreamFetchError::from(ConfigurationError::InvalidPageBound);
        assert_eq!(err.page(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(UpstreamFetchError::Status { page: 0, status: 429 }.is_retryable());
        assert!(UpstreamFetchError::Status { page: 0, status: 502 }.is_retryable());
        assert!(!UpstreamFetchError::Status { page: 0, status: 403 }.is_retryable());
        assert!(
            UpstreamFetchError::Transport {
                page: 1,
                message: "connection reset".to_string()
            }
            .is_retryable()
        );
        assert!(
            !UpstreamFetchError::Decode {
                page: 1,
                message: "eof".to_string()
            }
            .is_retryable()
        );
    }
}
