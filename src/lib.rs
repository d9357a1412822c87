pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/session", get(handlers::session::get_session))
        .route("/api/guard", get(handlers::session::check_route))
        .route(
            "/api/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/api/clients/:id",
            axum::routing::patch(handlers::clients::update_client),
        )
        .route(
            "/api/settings",
            axum::routing::patch(handlers::settings::update_settings),
        )
        .route(
            "/api/admin/artists/:id/features",
            axum::routing::patch(handlers::settings::update_artist_features),
        )
        .route("/api/calendar", get(handlers::calendar::month_view))
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking).patch(handlers::bookings::update_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/bookings/:id/remind",
            post(handlers::bookings::send_reminder),
        )
        .route(
            "/calendar/:tenant_id/:booking_id",
            get(handlers::calendar::download_ics),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
