//! Error types and handling for Refbuf

/// Result type alias for Refbuf operations
pub type Result<T> = std::result::Result<T, RefbufError>;

/// Error types for the Refbuf shared buffer library
///
/// Only environmental failures are reported through this enum. Reference
/// count violations (over-release, use after destruction) are caller bugs
/// and abort via assertion instead of returning an error.
#[derive(Debug, thiserror::Error)]
pub enum RefbufError {
    /// The allocator could not satisfy a buffer creation request
    #[error("Allocation failed: requested {requested} payload bytes")]
    AllocationFailed { requested: usize },

    /// Invalid parameters passed across an API boundary
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl RefbufError {
    /// Create an allocation failure error
    pub fn allocation_failed(requested: usize) -> Self {
        Self::AllocationFailed { requested }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, message: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RefbufError::allocation_failed(4096);
        assert_eq!(
            err.to_string(),
            "Allocation failed: requested 4096 payload bytes"
        );

        let err = RefbufError::invalid_parameter("size", "size exceeds isize::MAX");
        assert!(err.to_string().contains("size exceeds isize::MAX"));
    }
}
