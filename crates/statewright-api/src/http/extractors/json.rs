//! JSON body extractor that reports failures in the envelope format.
//!
//! axum's own `Json` rejects bad bodies with a plain-text response; `ApiJson`
//! turns the rejection into an [`AppError`] so clients always get `errors[]`.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

/// Deserialized JSON request body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "rejected request body");
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}
