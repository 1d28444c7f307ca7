// HTTP Handlers Module
// Mock versions of the dashboard's data routes, served from the simulator.

use super::state::AppState;
use crate::errors::SimulatedFailure;
use crate::stats::ResourceKind;
use crate::types::{Analytics, Post, Profile, Reel};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Query string shared by every data route
#[derive(Debug, Default, Deserialize)]
pub struct HandleQuery {
    pub username: Option<String>,
}

impl HandleQuery {
    /// The supplied handle, treating an empty value as absent
    fn handle(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "feedsim"
    }))
}

/// GET /feedsim/stats - Get server statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.stats.snapshot())
}

/// GET /api/profile
///
/// Provider failures never reach the client here: the simulated profile is
/// served instead.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HandleQuery>,
) -> Json<Option<Profile>> {
    let start = Instant::now();
    state
        .stats
        .record_request_start(ResourceKind::Profile, query.handle());

    let Some(handle) = query.handle() else {
        state.stats.record_request_end(start.elapsed());
        return Json(None);
    };

    tracing::info!(handle = %handle, "Profile request");

    if let Some(failure) = state.injector.maybe_inject() {
        tracing::warn!(
            handle = %handle,
            failure = failure.as_str(),
            "Provider failed, falling back to simulated profile"
        );
        state.stats.record_fallback();
    }

    let profile = state.source.profile(handle);
    state.stats.record_request_end(start.elapsed());
    Json(Some(profile))
}

/// GET /api/posts
pub async fn posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HandleQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    media_route(&state, &query, ResourceKind::Posts, |handle| {
        state.source.posts(handle)
    })
}

/// GET /api/reels
pub async fn reels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HandleQuery>,
) -> Result<Json<Vec<Reel>>, AppError> {
    media_route(&state, &query, ResourceKind::Reels, |handle| {
        state.source.reels(handle)
    })
}

/// Shared flow for list routes: empty list without a handle, surfaced
/// provider failures, otherwise the generated items.
fn media_route<T>(
    state: &AppState,
    query: &HandleQuery,
    kind: ResourceKind,
    generate: impl FnOnce(&str) -> Vec<T>,
) -> Result<Json<Vec<T>>, AppError> {
    let start = Instant::now();
    state.stats.record_request_start(kind, query.handle());

    let Some(handle) = query.handle() else {
        state.stats.record_request_end(start.elapsed());
        return Ok(Json(Vec::new()));
    };

    tracing::info!(handle = %handle, resource = kind.as_str(), "Media request");

    if let Some(failure) = state.injector.maybe_inject() {
        tracing::warn!(
            handle = %handle,
            resource = kind.as_str(),
            failure = failure.as_str(),
            "Injecting provider failure"
        );
        state.stats.record_failure(failure);
        return match failure {
            SimulatedFailure::EmptyMedia => Ok(Json(Vec::new())),
            _ => Err(AppError::from_failure(failure, kind)),
        };
    }

    let items = generate(handle);
    tracing::debug!(count = items.len(), resource = kind.as_str(), "Generated items");
    state.stats.record_request_end(start.elapsed());
    Ok(Json(items))
}

/// GET /api/analytics
///
/// Without a handle the placeholder report is returned. A provider that
/// yields no media (including a failed handle lookup) produces a zeroed
/// report rather than an error.
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HandleQuery>,
) -> Result<Json<Analytics>, AppError> {
    let start = Instant::now();
    state
        .stats
        .record_request_start(ResourceKind::Analytics, query.handle());

    let Some(handle) = query.handle() else {
        state.stats.record_request_end(start.elapsed());
        return Ok(Json(Analytics::placeholder()));
    };

    tracing::info!(handle = %handle, "Analytics request");

    if let Some(failure) = state.injector.maybe_inject() {
        tracing::warn!(
            handle = %handle,
            failure = failure.as_str(),
            "Injecting provider failure"
        );
        state.stats.record_failure(failure);
        return match failure {
            SimulatedFailure::UpstreamError => {
                Err(AppError::from_failure(failure, ResourceKind::Analytics))
            }
            SimulatedFailure::UserNotFound | SimulatedFailure::EmptyMedia => {
                Ok(Json(Analytics::empty()))
            }
        };
    }

    let analytics = state.source.analytics(handle);
    state.stats.record_request_end(start.elapsed());
    Ok(Json(analytics))
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Provider failure surfaced with the status it maps to
    Provider { status: u16, message: String },
}

impl AppError {
    pub fn from_failure(failure: SimulatedFailure, kind: ResourceKind) -> Self {
        let message = match failure {
            SimulatedFailure::UserNotFound => "User not found".to_string(),
            SimulatedFailure::UpstreamError | SimulatedFailure::EmptyMedia => {
                format!("Failed to fetch {}", kind.as_str())
            }
        };
        AppError::Provider {
            status: failure.status_code(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Provider { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            ),
        };

        let mut response = Json(serde_json::json!({ "error": message })).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_query_treats_empty_as_missing() {
        let query = HandleQuery {
            username: Some(String::new()),
        };
        assert_eq!(query.handle(), None);
        assert_eq!(HandleQuery::default().handle(), None);

        let query = HandleQuery {
            username: Some("testuser".to_string()),
        };
        assert_eq!(query.handle(), Some("testuser"));
    }

    #[test]
    fn test_app_error_status_follows_failure() {
        let error = AppError::from_failure(SimulatedFailure::UserNotFound, ResourceKind::Reels);
        assert!(matches!(
            &error,
            AppError::Provider { status: 404, message } if message == "User not found"
        ));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);

        let error = AppError::from_failure(SimulatedFailure::UpstreamError, ResourceKind::Posts);
        assert!(matches!(
            &error,
            AppError::Provider { status: 500, message } if message == "Failed to fetch posts"
        ));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
