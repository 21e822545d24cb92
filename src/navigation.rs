//! The console's pages and their paths.

use std::fmt::{self, Display};

/// A page of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Signup,
    Login,
    Dashboard,
    Products,
    UserManagement,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Root,
        Route::Signup,
        Route::Login,
        Route::Dashboard,
        Route::Products,
        Route::UserManagement,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Products => "/products",
            Route::UserManagement => "/user-management",
        }
    }

    /// Exact match on the path; a trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Whether the navigation bar is shown on this page.
    pub fn shows_navigation(self) -> bool {
        matches!(self, Route::Dashboard | Route::Products | Route::UserManagement)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Logging out keeps no state to clear; it only leads back to the login page.
pub fn logout() -> Route {
    Route::Login
}
