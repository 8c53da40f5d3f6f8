//! # API Error Type
//!
//! Unified error type for the HTTP boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Flow                                      │
//! │                                                                         │
//! │  Client                       Rust Backend                              │
//! │  ──────                       ────────────                              │
//! │                                                                         │
//! │  POST /api/sales                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler: Result<T, ApiError>                                    │  │
//! │  │                                                                  │  │
//! │  │  ValidationError ──► 400 { code, message, field }                │  │
//! │  │  No session      ──► 401 { code, message, redirect: "/login" }   │  │
//! │  │  Role denied     ──► 403 { code, message }                       │  │
//! │  │  InsufficientStock ► 422 { code, message, field }                │  │
//! │  │  DbError         ──► logged, 500 with a generic message          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Database details are logged via tracing and never leak to the client;
//! the client sees a generic message and the page renders empty aggregates.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use elegante_core::{CoreError, Page, ValidationError};
use elegante_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be positive",
///   "field": "quantity"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// The offending input field, for inline form messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Where an unauthenticated caller should be sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Login failed (401); message is always the generic one
    AuthFailed,

    /// No session (401)
    Unauthenticated,

    /// Role not permitted for the page (403)
    Forbidden,

    /// Requested sale quantity exceeds stock (422)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub const fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::AuthFailed => StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
            redirect: None,
        }
    }

    /// No session: 401 plus the login redirect hint.
    pub fn unauthenticated() -> Self {
        ApiError {
            code: ErrorCode::Unauthenticated,
            message: "Authentication required".to_string(),
            field: None,
            redirect: Some("/login"),
        }
    }

    /// Role not in the page's allowed set: a hard deny.
    pub fn forbidden(page: Page) -> Self {
        ApiError::new(
            ErrorCode::Forbidden,
            format!("Access to {} is not permitted for your role", page.label()),
        )
    }

    /// The single generic login failure. Whether the username or the
    /// password was wrong is never exposed.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::AuthFailed, "Invalid username or password")
    }

    /// Internal error with a caller-facing message.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Attaches the offending field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions from lower layers
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        ApiError::new(ErrorCode::ValidationError, err.to_string()).with_field(field)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                ApiError::new(ErrorCode::NotFound, format!("Product not found: {id}"))
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
                    .with_field("quantity")
            }
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { field } => {
                // SQLite reports "table.column"; the column is the field the
                // form should highlight.
                let column = field.rsplit('.').next().unwrap_or(&field).to_string();
                ApiError::new(
                    ErrorCode::ValidationError,
                    format!("{column} already exists"),
                )
                .with_field(column)
            }
            DbError::StockExhausted {
                product_id,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock for product {product_id}: requested {requested}"),
            )
            .with_field("quantity"),
            other => {
                // Log the detail, return a generic message: the page falls
                // back to empty data rather than leaking internals.
                error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Storage operation failed")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::InsufficientStock.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_unauthenticated_carries_redirect() {
        let err = ApiError::unauthenticated();
        assert_eq!(err.redirect, Some("/login"));
    }

    #[test]
    fn test_validation_error_carries_field() {
        let err: ApiError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("quantity"));
    }

    #[test]
    fn test_unique_violation_maps_to_field_message() {
        let err: ApiError = DbError::UniqueViolation {
            field: "products.sku".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("sku"));
    }

    #[test]
    fn test_generic_login_failure_message() {
        let err = ApiError::invalid_credentials();
        assert_eq!(err.message, "Invalid username or password");
    }
}
