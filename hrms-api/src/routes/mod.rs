/// API route handlers
///
/// One module per resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, logout
/// - `employees`: Employee CRUD
/// - `teams`: Team CRUD plus assignment endpoints
/// - `logs`: Audit log listing
use serde::Serialize;

pub mod auth;
pub mod employees;
pub mod health;
pub mod logs;
pub mod teams;

/// Success envelope carrying a payload
///
/// Mutations include a human message; plain reads carry only the data.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Always true for success responses
    pub success: bool,

    /// Human-readable outcome description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response payload
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Envelope for read endpoints
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Envelope for mutations, with an outcome message
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Success envelope without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always true for success responses
    pub success: bool,

    /// Human-readable outcome description
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
