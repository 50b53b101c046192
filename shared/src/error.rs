//! Unified error system for the smart-menu backend
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors
//!
//! Validation-class errors map to 4xx HTTP statuses and carry enough
//! identifying detail (offending id or code) for the caller to correct the
//! request. System-class errors map to 5xx statuses with a generic message
//! that does not leak storage internals.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Unified error code enum
///
/// Codes are plain u16 values for efficient serialization and
/// cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order contains no items
    OrderEmpty = 4002,
    /// Item quantity below one
    InvalidQuantity = 4003,

    // ==================== 6xxx: Catalog ====================
    /// Referenced product does not exist
    ProductNotFound = 6001,
    /// Referenced option value does not exist
    OptionValueNotFound = 6002,
    /// Voucher code unknown or inactive
    VoucherNotFound = 6003,
    /// Order subtotal below the voucher minimum
    VoucherMinimumNotMet = 6004,
    /// Referenced category does not exist
    CategoryNotFound = 6005,
    /// Referenced option group does not exist
    OptionGroupNotFound = 6006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

/// Error raised when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order contains no items",
            Self::InvalidQuantity => "Quantity must be at least 1",
            Self::ProductNotFound => "Product not found",
            Self::OptionValueNotFound => "Option value not found",
            Self::VoucherNotFound => "Voucher code is not valid or no longer active",
            Self::VoucherMinimumNotMet => "Order does not meet the voucher minimum",
            Self::CategoryNotFound => "Category not found",
            Self::OptionGroupNotFound => "Option group not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// HTTP status an external transport should answer with
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound | Self::OrderNotFound | Self::CategoryNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::InvalidQuantity
            | Self::ProductNotFound
            | Self::OptionValueNotFound
            | Self::VoucherNotFound
            | Self::VoucherMinimumNotMet
            | Self::OptionGroupNotFound => StatusCode::BAD_REQUEST,
        }
    }

    /// Whether this code represents a caller-fixable validation failure
    pub fn is_validation(&self) -> bool {
        self.http_status().is_client_error()
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, InvalidErrorCode> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderEmpty),
            4003 => Ok(Self::InvalidQuantity),
            6001 => Ok(Self::ProductNotFound),
            6002 => Ok(Self::OptionValueNotFound),
            6003 => Ok(Self::VoucherNotFound),
            6004 => Ok(Self::VoucherMinimumNotMet),
            6005 => Ok(Self::CategoryNotFound),
            6006 => Ok(Self::OptionGroupNotFound),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (offending ids, thresholds, context)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// HTTP status for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Result type alias for operations returning [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Unknown product in cart")
            .with_detail("product_id", 42)
            .with_detail("line", 0);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("product_id").unwrap(), 42);
        assert_eq!(details.get("line").unwrap(), 0);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            AppError::new(ErrorCode::ProductNotFound).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::new(ErrorCode::VoucherMinimumNotMet).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::DatabaseError).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(ErrorCode::VoucherNotFound.is_validation());
        assert!(ErrorCode::InvalidQuantity.is_validation());
        assert!(!ErrorCode::DatabaseError.is_validation());
    }

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::VoucherMinimumNotMet,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "E0002");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "E4001");
    }
}
