use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use websess_core::{CookieJar, SESSION_ID_KEY};

use crate::state::AppState;

/// Login form fields. Credential validation itself is out of scope; the
/// submitted user name doubles as the session id.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /index` — login submission. Empty fields bounce back to the
/// login page; otherwise a fresh session is created and the cookie
/// attached to the redirect to the landing page.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let session = &state.settings.session;

    if form.user_name.is_empty() || form.password.is_empty() {
        return Redirect::to(&session.login_path).into_response();
    }

    let mut jar = CookieJar::new();
    jar.insert(SESSION_ID_KEY, form.user_name.as_str());
    state.store.create(&form.user_name, jar.clone());
    info!("Logged in session {}", form.user_name);

    (
        [(header::SET_COOKIE, jar.encode())],
        Redirect::to(&session.landing_path),
    )
        .into_response()
}
