//! The uniform API envelope: `{success, data?, error?}`.

use serde::{Deserialize, Serialize};

/// Successful response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Failure envelope. `details` lists individual field violations on
/// structured validation failures (422) and is omitted otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn forbidden() -> Self {
        Self::new("Forbidden")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn validation(details: Vec<String>) -> Self {
        Self::new("Validation failed").with_details(details)
    }

    pub fn internal_error() -> Self {
        Self::new("Server Error")
    }
}
