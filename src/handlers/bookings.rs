use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, BookingError};
use crate::handlers::{authorize, tenant_header};
use crate::models::{Booking, BookingPatch, ClientDirectory, NewBooking};
use crate::services::access::Route;
use crate::services::messaging::Channel;
use crate::services::reminders;
use crate::state::AppState;

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub date: Option<NaiveDate>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let bookings = state.with_tenant(&tenant_id, |tenant| {
        Ok(match query.date {
            Some(date) => tenant.bookings.on_day(date).into_iter().cloned().collect(),
            None => tenant.bookings.all().to_vec(),
        })
    })?;
    Ok(Json(bookings))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let booking = state.with_tenant(&tenant_id, |tenant| {
        tenant
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.clone()).into())
    })?;
    Ok(Json(booking))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let booking = state.mutate_tenant(&tenant_id, |tenant| {
        let created = tenant
            .bookings
            .create(body, &tenant.clients, &tenant.services)
            .inspect_err(|e| tracing::info!(tenant = %tenant.id, error = %e, "booking rejected"))?;
        Ok(created.clone())
    })?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// PATCH /api/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<BookingPatch>,
) -> Result<Json<Booking>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let booking = state.mutate_tenant(&tenant_id, |tenant| {
        let updated = tenant
            .bookings
            .update(&id, body, &tenant.clients, &tenant.services)
            .inspect_err(|e| tracing::info!(tenant = %tenant.id, booking_id = %id, error = %e, "update rejected"))?;
        Ok(updated.clone())
    })?;
    Ok(Json(booking))
}

// POST /api/bookings/:id/cancel
#[derive(Deserialize, Default)]
pub struct CancelRequest {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Option<Json<CancelRequest>>,
) -> Result<Json<Booking>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;
    let Json(body) = body.unwrap_or_default();

    let booking = state.mutate_tenant(&tenant_id, |tenant| {
        Ok(tenant.bookings.cancel(&id, body.confirm)?.clone())
    })?;
    Ok(Json(booking))
}

// POST /api/bookings/:id/remind
#[derive(Serialize)]
pub struct ReminderResponse {
    ok: bool,
    queued: Vec<Channel>,
}

pub async fn send_reminder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ReminderResponse>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let queued = state.with_tenant(&tenant_id, |tenant| {
        let booking = tenant
            .bookings
            .get(&id)
            .ok_or_else(|| BookingError::NotFound(id.clone()))?;
        let client = tenant.clients.find(&booking.client_id);
        Ok(reminders::build_reminders(
            booking,
            client,
            &tenant.notifications,
            &tenant.business_name,
        )?)
    })?;

    let channels = queued.iter().map(|r| r.channel).collect();
    reminders::dispatch(Arc::clone(&state.messaging), id, queued);

    Ok(Json(ReminderResponse {
        ok: true,
        queued: channels,
    }))
}
