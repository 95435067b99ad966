//! Pure render-or-redirect decision for a navigation.

use serde::{Deserialize, Serialize};

use super::{Route, RouteKind};
use crate::domain::session::SessionState;

/// What the router should do with a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "target", rename_all = "snake_case")]
pub enum Verdict {
    Render,
    /// Hold the view back until the provider has answered.
    ShowLoading,
    Redirect(Route),
}

impl Verdict {
    pub fn redirect_target(&self) -> Option<Route> {
        match self {
            Verdict::Redirect(route) => Some(*route),
            _ => None,
        }
    }
}

/// Decides what a navigation to a route of `kind` may show in `state`.
///
/// | kind    | Initializing | Anonymous       | Authenticated       |
/// |---------|--------------|-----------------|---------------------|
/// | Public  | Render       | Render          | Render              |
/// | Login   | ShowLoading  | Render          | Redirect(dashboard) |
/// | Guarded | ShowLoading  | Redirect(login) | Render              |
pub fn decide(kind: RouteKind, state: &SessionState) -> Verdict {
    match (kind, state) {
        (RouteKind::Public, _) => Verdict::Render,
        (RouteKind::Login | RouteKind::Guarded, SessionState::Initializing) => Verdict::ShowLoading,
        (RouteKind::Login, SessionState::Anonymous) => Verdict::Render,
        (RouteKind::Login, SessionState::Authenticated(_)) => Verdict::Redirect(Route::Dashboard),
        (RouteKind::Guarded, SessionState::Anonymous) => Verdict::Redirect(Route::Login),
        (RouteKind::Guarded, SessionState::Authenticated(_)) => Verdict::Render,
    }
}
