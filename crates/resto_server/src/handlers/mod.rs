//! Route handlers, one module per resource.

pub mod auth;
pub mod health;
pub mod restaurants;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;

use resto_core::error::RestoError;

use crate::error::AppError;

/// Unwrap a typed query extraction, turning axum's rejection into the
/// uniform 400 `{ "message": … }` body.
pub(crate) fn take_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => Err(RestoError::InvalidInput(rejection.body_text()).into()),
    }
}

/// Same for JSON bodies.
pub(crate) fn take_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(RestoError::InvalidInput(rejection.body_text()).into()),
    }
}

/// Same for typed path segments (a malformed restaurant id is a 400, not
/// a route miss).
pub(crate) fn take_path<T>(path: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    match path {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => Err(RestoError::InvalidInput(rejection.body_text()).into()),
    }
}
