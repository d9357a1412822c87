use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, BookingError};
use crate::handlers::{authorize, tenant_header};
use crate::services::access::Route;
use crate::services::calendar::{self, DayCell};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`; defaults to the current month.
    pub month: Option<String>,
}

#[derive(Serialize)]
pub struct MonthView {
    month: String,
    label: String,
    prev: Option<String>,
    next: Option<String>,
    cells: Vec<Option<DayCell>>,
}

fn parse_month(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid month {s:?}, expected YYYY-MM")))
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

// GET /api/calendar?month=YYYY-MM
pub async fn month_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let tenant_id = authorize(&state, tenant_header(&headers), &Route::Bookings)?;

    let anchor = match query.month.as_deref() {
        Some(m) => parse_month(m)?,
        None => Local::now().date_naive(),
    };
    let grid = calendar::month_grid(anchor);
    let cells = state.with_tenant(&tenant_id, |tenant| {
        Ok(calendar::bucket_by_day(&grid, tenant.bookings.all()))
    })?;

    Ok(Json(MonthView {
        month: month_key(anchor),
        label: anchor.format("%B %Y").to_string(),
        prev: calendar::shift_month(anchor, -1).map(month_key),
        next: calendar::shift_month(anchor, 1).map(month_key),
        cells,
    }))
}

// GET /calendar/:tenant_id/:booking_id(.ics)
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, raw_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let tenant_id = authorize(&state, Some(tenant_id.as_str()), &Route::Bookings)?;
    let booking_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id).to_string();

    let ics = state.with_tenant(&tenant_id, |tenant| {
        let booking = tenant
            .bookings
            .get(&booking_id)
            .ok_or_else(|| BookingError::NotFound(booking_id.clone()))?;
        let business_name = if tenant.business_name.is_empty() {
            state.config.business_name.as_str()
        } else {
            tenant.business_name.as_str()
        };
        Ok(calendar::generate_ics(
            booking,
            business_name,
            tenant.time_slot_interval,
            chrono::Utc::now().naive_utc(),
        ))
    })?;

    let filename = format!("booking-{booking_id}.ics");
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-03").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }
}
