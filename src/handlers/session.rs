use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::{session_for, tenant_header};
use crate::models::{FeatureFlags, UserRole};
use crate::services::access::{self, Route, RouteDecision};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    tenant_id: String,
    role: UserRole,
    features: FeatureFlags,
    navigation: Vec<String>,
    chat_widget: bool,
}

// GET /api/session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let tenant_id = tenant_header(&headers).ok_or(AppError::Unauthorized)?;
    let session = session_for(&state, Some(tenant_id)).ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse {
        tenant_id: tenant_id.to_string(),
        role: session.role,
        features: session.features,
        navigation: access::navigation(&session).iter().map(Route::path).collect(),
        chat_widget: access::chat_widget_visible(Some(&session)),
    }))
}

// GET /api/guard?path=/bookings
#[derive(Deserialize)]
pub struct GuardQuery {
    pub path: String,
}

pub async fn check_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<GuardQuery>,
) -> Result<Json<RouteDecision>, AppError> {
    let route = Route::from_path(&query.path)
        .ok_or_else(|| AppError::NotFound(format!("route {}", query.path)))?;
    let session = session_for(&state, tenant_header(&headers));
    Ok(Json(access::guard(&route, session.as_ref())))
}
