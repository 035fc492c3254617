//! # Access Gate
//!
//! Runs in front of every page request and decides whether it may continue.
//!
//! ## Decision Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /path  (cookies: accessToken, userRole)                            │
//! │       │                                                                 │
//! │       ├── /api, /_next/static, /_next/image, /favicon.ico ──► untouched │
//! │       │                                                                 │
//! │       ├── no session,  not /login ─────────────► 307 /login             │
//! │       ├── session,     /login ─────────────────► 307 /                  │
//! │       ├── /settings, /reports,   role != Admin ► 307 /                  │
//! │       ├── /invoicing, /customers, no known role ► 307 /                 │
//! │       │                                                                 │
//! │       └── continue + security headers                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authentication is checked before authorization, so a visitor without a
//! session only ever sees the login redirect.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{COOKIE, LOCATION};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use lavanflow_core::Role;
use tracing::debug;

use crate::config::GateConfig;

// =============================================================================
// Routes
// =============================================================================

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Path prefixes (after the leading `/`) the gate never sees.
const UNGATED_PREFIXES: [&str; 4] = ["api", "_next/static", "_next/image", "favicon.ico"];

const ADMIN_PREFIXES: [&str; 2] = ["/settings", "/reports"];
const PRIVILEGED_PREFIXES: [&str; 2] = ["/invoicing", "/customers"];
const PRIVILEGED_ROLES: [Role; 4] = [Role::Admin, Role::Salesperson, Role::Cashier, Role::Special];

// =============================================================================
// Security Headers
// =============================================================================

pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    (
        "content-security-policy",
        "default-src 'self'; script-src 'self' 'unsafe-inline' 'unsafe-eval' https://cdn.tailwindcss.com; style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; font-src 'self' https://fonts.gstatic.com; img-src 'self' data: blob:; connect-src 'self' https://*.google.com;",
    ),
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

// =============================================================================
// Decision
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(Redirect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// No session: send to the login page, keeping the query string.
    Login,
    /// Already signed in but asking for the login page.
    LeaveLogin,
    /// Signed in without the role the page needs.
    Forbidden,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => LOGIN_PATH,
            Redirect::LeaveLogin | Redirect::Forbidden => ROOT_PATH,
        }
    }

    fn keeps_query(&self) -> bool {
        !matches!(self, Redirect::Forbidden)
    }

    /// The `Location` for a request to `uri`.
    pub fn location(&self, uri: &Uri) -> String {
        match uri.query() {
            Some(query) if self.keeps_query() && !query.is_empty() => {
                format!("{}?{}", self.path(), query)
            }
            _ => self.path().to_string(),
        }
    }
}

/// Whether the gate applies to `path` at all.
pub fn is_gated_path(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !UNGATED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix))
}

/// Decides the fate of a request to `path`. Empty cookie values count as absent.
pub fn decide(path: &str, session: Option<&str>, role: Option<&str>) -> GateDecision {
    let signed_in = session.is_some_and(|token| !token.is_empty());
    let on_login = path.starts_with(LOGIN_PATH);

    if !signed_in && !on_login {
        return GateDecision::Redirect(Redirect::Login);
    }
    if signed_in && on_login {
        return GateDecision::Redirect(Redirect::LeaveLogin);
    }

    // Exact role names only; "admin" is not Admin.
    let role = role.and_then(|name| name.parse::<Role>().ok());

    if starts_with_any(path, &ADMIN_PREFIXES) && role != Some(Role::Admin) {
        return GateDecision::Redirect(Redirect::Forbidden);
    }
    if starts_with_any(path, &PRIVILEGED_PREFIXES)
        && !role.is_some_and(|role| PRIVILEGED_ROLES.contains(&role))
    {
        return GateDecision::Redirect(Redirect::Forbidden);
    }

    GateDecision::Continue
}

fn starts_with_any(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix))
}

// =============================================================================
// Cookies
// =============================================================================

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

// =============================================================================
// Middleware
// =============================================================================

pub async fn gate_middleware(
    State(config): State<Arc<GateConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !is_gated_path(&path) {
        return next.run(req).await;
    }

    let headers = req.headers();
    let decision = decide(
        &path,
        cookie(headers, &config.session_cookie),
        cookie(headers, &config.role_cookie),
    );

    match decision {
        GateDecision::Redirect(redirect) => {
            let location = redirect.location(req.uri());
            debug!(path = %path, location = %location, reason = ?redirect, "Gate redirect");
            redirect_response(&location)
        }
        GateDecision::Continue => {
            let mut response = next.run(req).await;
            apply_security_headers(response.headers_mut());
            response
        }
    }
}

fn redirect_response(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
            response.headers_mut().insert(LOCATION, value);
            response
        }
        // The query came from a parsed Uri, so this is not expected.
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Puts the gate in front of every route of `router`.
pub fn with_gate<S>(router: Router<S>, config: GateConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(Arc::new(config), gate_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungated_paths() {
        assert!(!is_gated_path("/api/orders"));
        assert!(!is_gated_path("/_next/static/chunk.js"));
        assert!(!is_gated_path("/_next/image?url=x"));
        assert!(!is_gated_path("/favicon.ico"));
        assert!(is_gated_path("/"));
        assert!(is_gated_path("/dashboard"));
        assert!(is_gated_path("/_next/data"));
    }

    #[test]
    fn test_authentication_before_authorization() {
        assert_eq!(
            decide("/settings", None, Some("Cashier")),
            GateDecision::Redirect(Redirect::Login)
        );
        assert_eq!(
            decide("/dashboard", Some(""), Some("Admin")),
            GateDecision::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn test_login_page() {
        assert_eq!(decide("/login", None, None), GateDecision::Continue);
        assert_eq!(
            decide("/login", Some("tok"), Some("Admin")),
            GateDecision::Redirect(Redirect::LeaveLogin)
        );
    }

    #[test]
    fn test_role_rules() {
        assert_eq!(decide("/settings/users", Some("tok"), Some("Admin")), GateDecision::Continue);
        assert_eq!(
            decide("/reports", Some("tok"), Some("admin")),
            GateDecision::Redirect(Redirect::Forbidden)
        );
        assert_eq!(decide("/customers", Some("tok"), Some("Special")), GateDecision::Continue);
        assert_eq!(
            decide("/invoicing", Some("tok"), None),
            GateDecision::Redirect(Redirect::Forbidden)
        );
        assert_eq!(decide("/dashboard", Some("tok"), None), GateDecision::Continue);
    }

    #[test]
    fn test_redirect_location() {
        let uri: Uri = "/dashboard?tab=today".parse().unwrap();
        assert_eq!(Redirect::Login.location(&uri), "/login?tab=today");
        assert_eq!(Redirect::Forbidden.location(&uri), "/");
    }

    #[test]
    fn test_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; accessToken=abc; userRole=Cashier"));
        assert_eq!(cookie(&headers, "accessToken"), Some("abc"));
        assert_eq!(cookie(&headers, "userRole"), Some("Cashier"));
        assert_eq!(cookie(&headers, "missing"), None);
    }
}
