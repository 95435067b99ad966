//! Navigable routes of the site and their access class.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access class of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Marketing and informational pages, open to everyone.
    Public,
    /// The sign-in page: only useful to anonymous visitors.
    Login,
    /// Member-only pages.
    Guarded,
}

/// Every page the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    About,
    Contact,
    Login,
    Dashboard,
    Events,
    Jobs,
    Resources,
    CareerGuidance,
    ResumeBuilding,
    Mentorship,
    /// Fallback for unknown paths.
    NotFound,
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Home,
        Route::About,
        Route::Contact,
        Route::Login,
        Route::Dashboard,
        Route::Events,
        Route::Jobs,
        Route::Resources,
        Route::CareerGuidance,
        Route::ResumeBuilding,
        Route::Mentorship,
        Route::NotFound,
    ];

    /// Canonical path. `NotFound` has none of its own and reports `"*"`.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Events => "/events",
            Route::Jobs => "/jobs",
            Route::Resources => "/resources",
            Route::CareerGuidance => "/services/career-guidance",
            Route::ResumeBuilding => "/services/resume-building",
            Route::Mentorship => "/services/mentorship",
            Route::NotFound => "*",
        }
    }

    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Home | Route::About | Route::Contact | Route::NotFound => RouteKind::Public,
            Route::Login => RouteKind::Login,
            Route::Dashboard
            | Route::Events
            | Route::Jobs
            | Route::Resources
            | Route::CareerGuidance
            | Route::ResumeBuilding
            | Route::Mentorship => RouteKind::Guarded,
        }
    }

    /// Resolves a request path, ignoring query string, fragment and trailing slash.
    pub fn from_path(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::ALL
            .into_iter()
            .find(|route| *route != Route::NotFound && route.path() == normalized)
            .unwrap_or(Route::NotFound)
    }

    pub fn is_guarded(&self) -> bool {
        self.kind() == RouteKind::Guarded
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
