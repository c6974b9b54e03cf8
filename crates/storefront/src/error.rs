//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Errors render as the storefront error page, never with internal details.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use misterdesign_core::StorageError;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing a persisted collection failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product API could not be reached or answered badly.
    /// `message` is what the page shows in place of its content.
    #[error("{message}: {source}")]
    Catalog {
        message: &'static str,
        #[source]
        source: CatalogError,
    },

    /// A blocking store task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Wrap a product API error. Unknown products become [`AppError::NotFound`].
    #[must_use]
    pub fn catalog(message: &'static str, source: CatalogError) -> Self {
        match source {
            CatalogError::NotFound(_) => Self::NotFound(PRODUCT_NOT_FOUND.to_string()),
            source => Self::Catalog { message, source },
        }
    }
}

/// Message shown when a product id is unknown or unusable.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Error page template.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Storage(_) | Self::Task(_) | Self::Catalog { .. }
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Storage(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Catalog { .. } => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Storage(_) => "Something went wrong saving your changes".to_string(),
            Self::Task(_) => "Something went wrong".to_string(),
            Self::Catalog { message, .. } => message.to_string(),
            Self::NotFound(message) => message,
        };

        (status, ErrorTemplate { message }).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
