use axum::{
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use tracing::warn;

use websess_core::CookieJar;

/// The unauthenticated outcome: a redirect to the login page, optionally
/// telling the client to drop a stale session cookie. Never a 4xx/5xx;
/// missing-cookie and missing-session are expected control flow.
pub struct AuthRedirect {
    login_path: String,
    clear_cookie: Option<String>,
}

impl AuthRedirect {
    pub fn to(login_path: &str) -> Self {
        Self {
            login_path: login_path.to_string(),
            clear_cookie: None,
        }
    }

    /// Redirect and clear the client's cookie by echoing the jar back
    /// with `Expires` stamped one hour in the past.
    pub fn clearing(login_path: &str, mut jar: CookieJar) -> Self {
        jar.set_expires(Utc::now() - Duration::hours(1));
        Self {
            login_path: login_path.to_string(),
            clear_cookie: Some(jar.encode()),
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        match self.clear_cookie {
            Some(cookie) => {
                warn!("Stale session cookie, clearing and redirecting to {}", self.login_path);
                (
                    [(header::SET_COOKIE, cookie)],
                    Redirect::to(&self.login_path),
                )
                    .into_response()
            }
            None => Redirect::to(&self.login_path).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn plain_redirect_carries_no_cookie() {
        let response = AuthRedirect::to("/login.html").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login.html");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn clearing_redirect_expires_the_jar() {
        let jar = CookieJar::decode("sessionId=ghost");
        let response = AuthRedirect::clearing("/login.html", jar).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("sessionId=ghost; Path=/; Expires="));
        assert!(cookie.ends_with("HttpOnly"));
    }
}
