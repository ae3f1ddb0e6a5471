use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::info;

mod config;
mod handlers;
mod response;
mod state;

use config::Settings;
use state::AppState;
use websess_core::{SessionReaper, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,websess_server=debug".to_string()),
        )
        .init();

    info!("Starting websess server...");

    let settings = Arc::new(Settings::load()?);
    info!(
        "Configuration loaded (ttl: {:?}, poll: {:?})",
        settings.session.ttl(),
        settings.session.poll_interval()
    );

    let store = Arc::new(SessionStore::new(settings.session.ttl()));
    let reaper = SessionReaper::new(store.clone(), settings.session.poll_interval()).spawn();

    let state = AppState::new(store, settings.clone());
    let shutdown = state.shutdown.clone();
    let app = build_router(state);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    // Serve loop drained; stop and join the reaper.
    reaper.shutdown().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal(stop: Arc<Notify>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received ctrl-c");
        }
        _ = stop.notified() => {}
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route(
            "/index",
            get(handlers::pages::hello).post(handlers::auth::login),
        )
        .route("/login.html", get(handlers::pages::login_page))
        .route("/dump", get(handlers::pages::dump))
        .route("/stop", get(handlers::pages::stop))
        .fallback(handlers::pages::fallback)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}
