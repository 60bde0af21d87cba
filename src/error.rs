use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use crate::actor_framework::StoreError;
use crate::auth::PasswordError;
use crate::category_actor::CategoryError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use crate::validation::{FieldErrors, NAME_NEEDS_LETTERS};

/// Everything a handler can end with besides success.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    /// Guard outcome. Sends the browser elsewhere instead of rendering an error.
    #[error("redirect to {0}")]
    Redirect(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "fieldErrors": errors })),
            )
                .into_response(),
            AppError::BadRequest(message) => failure(StatusCode::BAD_REQUEST, &message),
            AppError::Redirect(to) => Redirect::to(&to).into_response(),
            AppError::NotFound(message) => failure(StatusCode::NOT_FOUND, &message),
            AppError::Conflict(message) => failure(StatusCode::CONFLICT, &message),
            AppError::Internal(message) => {
                error!(error = %message, "Request failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, .. } => {
                let mut kind = kind.to_string();
                if let Some(first) = kind.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                AppError::NotFound(format!("{kind} not found"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::AlreadyExists(_) => AppError::field("email", "A user already exists with this email"),
            UserError::Store(e) => e.into(),
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(e: CategoryError) -> Self {
        match e {
            CategoryError::AlreadyExists(_) => AppError::field("name", "A category already exists with this name"),
            CategoryError::Unsluggable(_) => AppError::field("name", NAME_NEEDS_LETTERS),
            CategoryError::Store(e) => e.into(),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::SlugTaken(_) => AppError::field("name", "A product already exists with this name"),
            ProductError::Unsluggable(_) => AppError::field("name", NAME_NEEDS_LETTERS),
            ProductError::InsufficientStock { .. } => AppError::Conflict(e.to_string()),
            ProductError::Store(e) => e.into(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Transition(_) | OrderError::Stock(_) => AppError::Conflict(e.to_string()),
            OrderError::InvalidProduct(_) | OrderError::EmptyOrder => AppError::BadRequest(e.to_string()),
            OrderError::InvalidUser(_) => AppError::Internal(e.to_string()),
            OrderError::Store(e) => e.into(),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use crate::order_actor::TransitionError;

    #[test]
    fn test_error_mapping() {
        let not_found: AppError = StoreError::NotFound { kind: "order", id: "x".into() }.into();
        assert!(matches!(not_found, AppError::NotFound(ref m) if m == "Order not found"));

        let terminal: AppError = OrderError::Transition(TransitionError::Terminal(OrderStatus::Delivered)).into();
        assert_eq!(terminal.into_response().status(), StatusCode::CONFLICT);

        let taken: AppError = UserError::AlreadyExists("a@b.co".into()).into();
        assert!(matches!(taken, AppError::Validation(ref e) if e.get("email") == Some("A user already exists with this email")));

        let redirect = AppError::Redirect("/login".into()).into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect.headers()["location"], "/login");
    }
}
