use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::{authorize, tenant_header};
use crate::models::{FeatureFlags, FeaturePatch, NotificationConfig, NotificationPatch, UserRole};
use crate::services::access::{AdminPage, Route};
use crate::state::AppState;

// PATCH /api/admin/artists/:id/features
pub async fn update_artist_features(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(artist_id): Path<String>,
    Json(body): Json<FeaturePatch>,
) -> Result<Json<FeatureFlags>, AppError> {
    let route = Route::Admin(AdminPage::ArtistDetails(artist_id.clone()));
    let admin_id = authorize(&state, tenant_header(&headers), &route)?;

    let features = state.mutate_tenant(&artist_id, |tenant| {
        if tenant.role != UserRole::Artist {
            return Err(AppError::BadRequest(format!(
                "{} is not an artist workspace",
                tenant.id
            )));
        }
        tenant.features.apply(body);
        Ok(tenant.features)
    })?;

    tracing::info!(admin = %admin_id, artist = %artist_id, ?features, "artist features updated");
    Ok(Json(features))
}

// PATCH /api/settings
#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub notifications: Option<NotificationPatch>,
    pub time_slot_interval: Option<u32>,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    notifications: NotificationConfig,
    time_slot_interval: u32,
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Settings)?;
    if body.time_slot_interval == Some(0) {
        return Err(AppError::BadRequest(
            "time_slot_interval must be at least one minute".to_string(),
        ));
    }

    let settings = state.mutate_tenant(&tenant_id, |tenant| {
        if let Some(patch) = body.notifications {
            tenant.notifications.apply(patch);
        }
        if let Some(minutes) = body.time_slot_interval {
            tenant.time_slot_interval = minutes;
        }
        Ok(SettingsResponse {
            notifications: tenant.notifications,
            time_slot_interval: tenant.time_slot_interval,
        })
    })?;

    tracing::info!(tenant = %tenant_id, "settings updated");
    Ok(Json(settings))
}
