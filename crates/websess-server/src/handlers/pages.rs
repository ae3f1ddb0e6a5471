use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Html,
};
use tracing::{debug, info};

use websess_core::{CookieJar, SESSION_ID_KEY};

use crate::response::AuthRedirect;
use crate::state::AppState;

/// `GET /` — the authenticated landing page. Any resolution failure
/// (no cookie, no `sessionId` attribute, id unknown to the store) falls
/// into the redirect-to-login path; a decodable stale cookie is cleared
/// on the way out.
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AuthRedirect> {
    let login_path = &state.settings.session.login_path;

    let Some(raw) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        debug!("No cookie header, redirecting to login");
        return Err(AuthRedirect::to(login_path));
    };

    let jar = CookieJar::decode(raw);
    let Ok(session_id) = jar.value(SESSION_ID_KEY) else {
        return Err(AuthRedirect::clearing(login_path, jar));
    };

    match state.store.get(session_id) {
        Ok(session) => Ok(Html(landing_page(&session.id))),
        Err(_) => Err(AuthRedirect::clearing(login_path, jar)),
    }
}

/// `GET /index`
pub async fn hello() -> &'static str {
    "Hello World!\n"
}

/// `GET /login.html`
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// `GET /dump` — echo the request headers as plain text.
pub async fn dump(headers: HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers.iter() {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push('\n');
    }
    out
}

/// `GET /stop` — trigger graceful shutdown of the serve loop.
pub async fn stop(State(state): State<AppState>) -> &'static str {
    info!("Stop requested, shutting down");
    state.shutdown.notify_one();
    "Shutting down\n"
}

/// Fallback for unmatched routes: a tiny HTML error page.
pub async fn fallback() -> (StatusCode, Html<String>) {
    let status = StatusCode::NOT_FOUND;
    (
        status,
        Html(format!(
            "<p>Error Status: <span style='color:red;'>{}</span></p>",
            status.as_u16()
        )),
    )
}

fn landing_page(session_id: &str) -> String {
    format!(
        "<html><body>\
         <h1>Welcome back, {session_id}!</h1>\
         <p>Your session is active.</p>\
         </body></html>"
    )
}

const LOGIN_PAGE: &str = "<html><body>\
    <h1>Login</h1>\
    <form method='post' action='/index'>\
    <input type='text' name='userName' placeholder='User name'/>\
    <input type='password' name='password' placeholder='Password'/>\
    <input type='submit' value='Login'/>\
    </form>\
    </body></html>";
