use serde::Serialize;

use crate::models::{Feature, FeatureFlags, UserRole};

pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_HOME_PATH: &str = "/admin/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Root,
    Dashboard,
    Meetings,
    Tasks,
    Notes,
    Files,
    Settings,
    Crm,
    Bookings,
    Bot,
    Addons,
    Admin(AdminPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminPage {
    Dashboard,
    Artists,
    AddUser,
    ArtistDetails(String),
    Analytics,
    Billing,
    Support,
    Settings,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        let route = match path {
            "" => Route::Root,
            "/auth/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/meetings" => Route::Meetings,
            "/tasks" => Route::Tasks,
            "/notes" => Route::Notes,
            "/files" => Route::Files,
            "/settings" => Route::Settings,
            "/crm" => Route::Crm,
            "/bookings" => Route::Bookings,
            "/bot" => Route::Bot,
            "/addons" => Route::Addons,
            "/admin/dashboard" => Route::Admin(AdminPage::Dashboard),
            "/admin/artists" => Route::Admin(AdminPage::Artists),
            "/admin/users/add" => Route::Admin(AdminPage::AddUser),
            "/admin/analytics" => Route::Admin(AdminPage::Analytics),
            "/admin/billing" => Route::Admin(AdminPage::Billing),
            "/admin/support" => Route::Admin(AdminPage::Support),
            "/admin/settings" => Route::Admin(AdminPage::Settings),
            other => {
                let id = other.strip_prefix("/admin/artists/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::Admin(AdminPage::ArtistDetails(id.to_string()))
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Root => "/".to_string(),
            Route::Dashboard => DASHBOARD_PATH.to_string(),
            Route::Meetings => "/meetings".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::Notes => "/notes".to_string(),
            Route::Files => "/files".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Crm => "/crm".to_string(),
            Route::Bookings => "/bookings".to_string(),
            Route::Bot => "/bot".to_string(),
            Route::Addons => "/addons".to_string(),
            Route::Admin(page) => match page {
                AdminPage::Dashboard => ADMIN_HOME_PATH.to_string(),
                AdminPage::Artists => "/admin/artists".to_string(),
                AdminPage::AddUser => "/admin/users/add".to_string(),
                AdminPage::ArtistDetails(id) => format!("/admin/artists/{id}"),
                AdminPage::Analytics => "/admin/analytics".to_string(),
                AdminPage::Billing => "/admin/billing".to_string(),
                AdminPage::Support => "/admin/support".to_string(),
                AdminPage::Settings => "/admin/settings".to_string(),
            },
        }
    }

    /// Feature flag a route is gated behind, if any.
    pub fn feature(&self) -> Option<Feature> {
        match self {
            Route::Crm => Some(Feature::Crm),
            Route::Bookings => Some(Feature::Booking),
            Route::Bot => Some(Feature::Bot),
            _ => None,
        }
    }

    fn is_artist_only(&self) -> bool {
        matches!(self, Route::Crm | Route::Bookings | Route::Bot | Route::Addons)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub role: UserRole,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

fn redirect(path: &str) -> RouteDecision {
    RouteDecision::Redirect(path.to_string())
}

pub fn guard(route: &Route, session: Option<&Session>) -> RouteDecision {
    if *route == Route::Login {
        return RouteDecision::Allow;
    }
    let Some(session) = session else {
        return redirect(LOGIN_PATH);
    };

    match route {
        Route::Root if session.role == UserRole::Admin => redirect(ADMIN_HOME_PATH),
        Route::Root => redirect(DASHBOARD_PATH),
        Route::Admin(_) if session.role != UserRole::Admin => redirect(DASHBOARD_PATH),
        Route::Admin(_) => RouteDecision::Allow,
        _ if session.role == UserRole::Admin => redirect(ADMIN_HOME_PATH),
        r if r.is_artist_only() && session.role != UserRole::Artist => redirect(DASHBOARD_PATH),
        r => match r.feature() {
            Some(feature) if !session.features.is_enabled(feature) => redirect(DASHBOARD_PATH),
            _ => RouteDecision::Allow,
        },
    }
}

/// Sidebar entries for a signed-in tenant, in display order.
pub fn navigation(session: &Session) -> Vec<Route> {
    let candidates = match session.role {
        UserRole::Admin => vec![
            Route::Admin(AdminPage::Dashboard),
            Route::Admin(AdminPage::Artists),
            Route::Admin(AdminPage::Analytics),
            Route::Admin(AdminPage::Billing),
            Route::Admin(AdminPage::Support),
            Route::Admin(AdminPage::Settings),
        ],
        UserRole::Artist => vec![
            Route::Dashboard,
            Route::Crm,
            Route::Bookings,
            Route::Bot,
            Route::Meetings,
            Route::Tasks,
            Route::Notes,
            Route::Files,
            Route::Addons,
            Route::Settings,
        ],
        UserRole::Individual => vec![
            Route::Dashboard,
            Route::Meetings,
            Route::Tasks,
            Route::Notes,
            Route::Files,
            Route::Settings,
        ],
    };
    candidates
        .into_iter()
        .filter(|r| guard(r, Some(session)) == RouteDecision::Allow)
        .collect()
}

pub fn chat_widget_visible(session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.role == UserRole::Artist && s.features.bot_enabled)
}
