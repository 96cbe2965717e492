//! JSON body extractor
//!
//! Same as `axum::Json`, but a body that fails to deserialize is answered
//! with the portal's `ValidationFailed` response instead of axum's plain-text
//! rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    let text = rejection.body_text();
    tracing::debug!(error = %text, "Rejected JSON body");

    match rejection {
        JsonRejection::JsonDataError(_) => match missing_field(&text) {
            Some(field) => AppError::validation(format!("Missing field: {field}"))
                .with_detail(field, "is required"),
            None => AppError::validation("Request body has invalid fields").with_detail("body", text),
        },
        JsonRejection::MissingJsonContentType(_) => AppError::validation("Expected a JSON body")
            .with_detail("body", "Content-Type must be application/json"),
        _ => AppError::validation("Request body is not valid JSON").with_detail("body", text),
    }
}

/// Field name out of serde's "missing field `name`" message
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split("missing field `").nth(1)?;
    rest.split('`').next().filter(|field| !field.is_empty())
}
