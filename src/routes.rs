//! Route table and session-gated resolution.
//!
//! `/` needs an authenticated session; `/login` and `/signup` need its
//! absence. While the session is unknown nothing but the loading view is
//! reachable, which avoids showing the wrong screen before the probe settles.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    NotFound,
}

impl Route {
    #[must_use]
    pub fn parse(path: &str) -> Self {
        match path.trim().trim_end_matches('/') {
            "" => Self::Home,
            "/login" | "login" => Self::Login,
            "/signup" | "signup" => Self::Signup,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::NotFound => "/404",
        }
    }
}

/// What the view layer should do for a requested route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Loading,
    Render(Route),
    /// Replace the current route with this one and resolve again.
    Redirect(Route),
}

#[must_use]
pub fn resolve(session: Session, route: Route) -> Resolution {
    match (session, route) {
        (Session::Unknown, _) => Resolution::Loading,
        (Session::Authenticated, Route::Login | Route::Signup) => Resolution::Redirect(Route::Home),
        (Session::Unauthenticated, Route::Home) => Resolution::Redirect(Route::Login),
        (_, route) => Resolution::Render(route),
    }
}
