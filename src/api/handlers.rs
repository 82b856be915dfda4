//! HTTP request handlers for the share sacrifice API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compare_scenarios, compute_yearly_value};
use crate::error::EngineResult;

use super::request::{ScenarioRequest, YearlyValueRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/yearly-value", post(yearly_value_handler))
        .route("/scenarios", post(scenarios_handler))
        .with_state(state)
}

/// Handler for POST /yearly-value.
///
/// Returns the twelve-month table for one reduction tier.
async fn yearly_value_handler(
    State(state): State<AppState>,
    payload: Result<Json<YearlyValueRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing yearly value request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let params = match request.into_params(state.config()) {
        Ok(params) => params,
        Err(err) => return engine_error_response(err.into(), correlation_id),
    };

    let lookup = state.lookup();
    run_blocking(correlation_id, move || compute_yearly_value(&params, &*lookup)).await
}

/// Handler for POST /scenarios.
///
/// Returns one yearly table per tier with its cumulative series.
async fn scenarios_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing scenario comparison request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let params = match request.into_params(state.config()) {
        Ok(params) => params,
        Err(err) => return engine_error_response(err.into(), correlation_id),
    };

    let lookup = state.lookup();
    run_blocking(correlation_id, move || compare_scenarios(&params, &*lookup)).await
}

/// Runs a computation on the blocking pool and renders its outcome.
///
/// Lookups sleep and perform blocking HTTP requests, so they must stay off the
/// async worker threads.
async fn run_blocking<T, F>(correlation_id: Uuid, compute: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> EngineResult<T> + Send + 'static,
{
    let start_time = Instant::now();

    match tokio::task::spawn_blocking(compute).await {
        Ok(Ok(result)) => {
            info!(
                correlation_id = %correlation_id,
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Ok(Err(err)) => engine_error_response(err.into(), correlation_id),
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Calculation task failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::internal("Calculation task failed")),
            )
                .into_response()
        }
    }
}

fn engine_error_response(api_error: ApiErrorResponse, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Calculation failed"
    );
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
