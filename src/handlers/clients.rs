use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::{authorize, tenant_header};
use crate::models::{Client, ClientSource, ClientStatus};
use crate::services::access::Route;
use crate::state::AppState;

// GET /api/clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Client>>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Crm)?;
    let clients = state.with_tenant(&tenant_id, |tenant| Ok(tenant.clients.clone()))?;
    Ok(Json(clients))
}

// POST /api/clients
#[derive(Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: Option<ClientStatus>,
    pub source: Option<ClientSource>,
    pub venue: Option<String>,
    pub description: Option<String>,
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewClient>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Crm)?;
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("client name is required".to_string()));
    }

    let client = Client {
        id: uuid::Uuid::new_v4().to_string(),
        name: body.name.trim().to_string(),
        email: body.email,
        phone: body.phone,
        status: body.status.unwrap_or_default(),
        source: body.source.unwrap_or_default(),
        venue: body.venue,
        description: body.description,
    };

    let client = state.mutate_tenant(&tenant_id, |tenant| {
        tenant.clients.push(client.clone());
        Ok(client)
    })?;
    tracing::info!(tenant = %tenant_id, client_id = %client.id, "client added");
    Ok((StatusCode::CREATED, Json(client)))
}

// PATCH /api/clients/:id
#[derive(Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
    pub venue: Option<String>,
    pub description: Option<String>,
}

/// Bookings keep their copied name until their next edit re-resolves it.
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateClient>,
) -> Result<Json<Client>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Crm)?;

    let client = state.mutate_tenant(&tenant_id, |tenant| {
        let client = tenant
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("client {id}")))?;

        if let Some(name) = body.name.filter(|n| !n.trim().is_empty()) {
            client.name = name.trim().to_string();
        }
        if let Some(email) = body.email {
            client.email = email;
        }
        if let Some(phone) = body.phone {
            client.phone = phone;
        }
        if let Some(status) = body.status {
            client.status = status;
        }
        if let Some(venue) = body.venue {
            client.venue = Some(venue);
        }
        if let Some(description) = body.description {
            client.description = Some(description);
        }
        Ok(client.clone())
    })?;
    Ok(Json(client))
}
