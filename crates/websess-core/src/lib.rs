//! Server-side web sessions: cookie codec, concurrent session store and
//! background expiry reaper. HTTP-framework-free; the server crate supplies
//! the glue.

pub mod cookie;
pub mod error;
pub mod reaper;
pub mod store;

pub use cookie::{CookieJar, EXPIRES_KEY, SESSION_ID_KEY};
pub use error::SessionError;
pub use reaper::{ReaperHandle, SessionReaper, DEFAULT_POLL_INTERVAL};
pub use store::{Session, SessionStore, DEFAULT_TTL};
