pub mod bookings;
pub mod calendar;
pub mod clients;
pub mod health;
pub mod session;
pub mod settings;

use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::services::access::{self, Route, RouteDecision, Session};
use crate::state::AppState;

pub const TENANT_HEADER: &str = "x-tenant-id";

pub fn tenant_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub fn session_for(state: &AppState, tenant_id: Option<&str>) -> Option<Session> {
    let tenant_id = tenant_id?;
    let tenants = state.tenants.lock().unwrap();
    tenants.get(tenant_id).map(|t| Session {
        role: t.role,
        features: t.features,
    })
}

/// Applies the route guard for `route`; on success returns the tenant id.
pub fn authorize(state: &AppState, tenant_id: Option<&str>, route: &Route) -> Result<String, AppError> {
    let session = session_for(state, tenant_id);
    match access::guard(route, session.as_ref()) {
        RouteDecision::Allow => Ok(tenant_id.unwrap_or_default().to_string()),
        RouteDecision::Redirect(path) if path == access::LOGIN_PATH => Err(AppError::Unauthorized),
        RouteDecision::Redirect(path) => {
            tracing::debug!(tenant = tenant_id, route = %route.path(), redirect = %path, "route guarded");
            Err(AppError::Forbidden { redirect: path })
        }
    }
}
