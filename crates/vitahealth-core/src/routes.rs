//! Route table, navigation chrome and the access guard

use crate::session::Session;
use crate::storage::{KeyValueStore, TOKEN_KEY};
use std::fmt;

/// Every screen reachable by path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Features,
    About,
    Chatbot,
    Detect,
    Planner { vitamin: String },
    Profile,
    NotFound(String),
}

impl Route {
    /// Resolve a URL path. Query strings and fragments are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] | ["home"] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["features"] => Route::Features,
            ["about"] => Route::About,
            ["chatbot"] => Route::Chatbot,
            ["detect"] => Route::Detect,
            ["profile"] => Route::Profile,
            ["planner", vitamin] if !vitamin.is_empty() => Route::Planner {
                vitamin: (*vitamin).to_string(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical path for navigation
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Features => "/features".to_string(),
            Route::About => "/about".to_string(),
            Route::Chatbot => "/chatbot".to_string(),
            Route::Detect => "/detect".to_string(),
            Route::Planner { vitamin } => format!("/planner/{}", vitamin),
            Route::Profile => "/profile".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Routes wrapped by the access guard
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Detect | Route::Planner { .. } | Route::Profile
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decision of the access guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested route
    Allow(Route),
    /// Replace the navigation with this route
    Redirect(Route),
}

impl GuardOutcome {
    /// The route that ends up rendered
    pub fn route(&self) -> &Route {
        match self {
            GuardOutcome::Allow(route) | GuardOutcome::Redirect(route) => route,
        }
    }

    /// True when the destination was replaced
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardOutcome::Redirect(_))
    }
}

/// Gate `destination` on the presence of a persisted token.
///
/// Pure decision: no network call, no freshness check. An expired token still
/// passes and the destination page sees the 401.
pub fn guard<S: KeyValueStore>(destination: Route, store: &S) -> GuardOutcome {
    if !destination.is_protected() {
        return GuardOutcome::Allow(destination);
    }

    match store.get(TOKEN_KEY) {
        Some(token) if !token.is_empty() => GuardOutcome::Allow(destination),
        _ => {
            tracing::debug!(path = %destination, "No token, redirecting to login");
            GuardOutcome::Redirect(Route::Login)
        }
    }
}

/// How a navigation link decides whether it is the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMatch {
    Exact,
    Prefix,
}

/// A link in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub matching: ActiveMatch,
    /// Rendered as a call-to-action button
    pub primary: bool,
}

impl NavLink {
    /// Whether the link is highlighted for `current_path`
    pub fn is_active(&self, current_path: &str) -> bool {
        match self.matching {
            ActiveMatch::Exact => current_path == self.path,
            ActiveMatch::Prefix => current_path.starts_with(self.path),
        }
    }
}

const PUBLIC_LINKS: &[NavLink] = &[
    NavLink { label: "Home", path: "/", matching: ActiveMatch::Exact, primary: false },
    NavLink { label: "Features", path: "/features", matching: ActiveMatch::Exact, primary: false },
    NavLink { label: "About", path: "/about", matching: ActiveMatch::Exact, primary: false },
    NavLink { label: "Login", path: "/login", matching: ActiveMatch::Exact, primary: true },
    NavLink { label: "Register", path: "/register", matching: ActiveMatch::Exact, primary: false },
];

const DASHBOARD_LINKS: &[NavLink] = &[
    NavLink { label: "Detection", path: "/detect", matching: ActiveMatch::Prefix, primary: false },
    NavLink { label: "Planner", path: "/planner", matching: ActiveMatch::Prefix, primary: false },
];

/// Navigation chrome for the current session
pub fn nav_links(session: &Session) -> &'static [NavLink] {
    if session.is_authenticated() {
        DASHBOARD_LINKS
    } else {
        PUBLIC_LINKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Home)]
    #[case("/home", Route::Home)]
    #[case("/login", Route::Login)]
    #[case("/register/", Route::Register)]
    #[case("/chatbot", Route::Chatbot)]
    #[case("/detect?x=1", Route::Detect)]
    #[case("/planner/VitaminC", Route::Planner { vitamin: "VitaminC".to_string() })]
    #[case("/profile", Route::Profile)]
    #[case("/planner", Route::NotFound("/planner".to_string()))]
    #[case("/nope", Route::NotFound("/nope".to_string()))]
    fn test_parse(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), expected);
    }

    #[rstest]
    #[case("/detect")]
    #[case("/planner/B-Vitamin")]
    #[case("/profile")]
    fn test_guard_redirects_without_token(#[case] path: &str) {
        let store = MemoryStore::new();
        let outcome = guard(Route::parse(path), &store);
        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_allows_any_present_token() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "expired-but-present").unwrap();
        let outcome = guard(Route::Profile, &store);
        assert_eq!(outcome, GuardOutcome::Allow(Route::Profile));
    }

    #[test]
    fn test_guard_ignores_stale_session_value() {
        use crate::session::SessionStore;
        use crate::types::AuthResponse;

        let store = MemoryStore::new();
        let session = SessionStore::new(store.clone())
            .persist_login(&AuthResponse { token: "tok".to_string(), user: None })
            .unwrap();
        assert!(session.is_authenticated());

        // Token removed behind the session's back, e.g. by another tab
        store.remove(TOKEN_KEY).unwrap();
        for path in ["/detect", "/planner/VitaminA", "/profile"] {
            assert!(guard(Route::parse(path), &store).is_redirect());
        }
    }

    #[test]
    fn test_public_routes_pass() {
        let store = MemoryStore::new();
        assert_eq!(guard(Route::About, &store), GuardOutcome::Allow(Route::About));
    }

    #[test]
    fn test_nav_link_matching() {
        let planner = DASHBOARD_LINKS[1];
        assert!(planner.is_active("/planner/VitaminC"));
        let home = PUBLIC_LINKS[0];
        assert!(home.is_active("/"));
        assert!(!home.is_active("/about"));
        assert_eq!(nav_links(&Session::anonymous()).len(), 5);
    }
}
