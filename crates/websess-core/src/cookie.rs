use chrono::{DateTime, Utc};

use crate::error::SessionError;

/// Well-known cookie attribute carrying the session identifier.
pub const SESSION_ID_KEY: &str = "sessionId";

/// The one attribute `encode` treats specially (emitted after `Path=/`).
pub const EXPIRES_KEY: &str = "Expires";

/// `Expires` wire format: English abbreviations, always UTC, independent
/// of host locale (chrono never consults it).
const GMT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Ordered multi-map of cookie attributes, one per request. Built by
/// parsing a raw `Cookie` header; consumed to produce a `Set-Cookie`
/// header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `Cookie` header (`key=value; key=value` grammar).
    /// Fragments without a `=`, or with an empty key or value, are
    /// silently dropped. Pairs keep encounter order. Empty input yields
    /// an empty jar.
    pub fn decode(raw: &str) -> Self {
        let mut entries = Vec::new();
        for fragment in raw.split(';') {
            let Some((key, value)) = fragment.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            entries.push((key.to_string(), value.to_string()));
        }
        Self { entries }
    }

    /// Serialize to a `Set-Cookie` header value. Fixed field order is a
    /// wire contract: all pairs except `Expires` in insertion order, then
    /// `Path=/`, then `Expires` if present, terminated by `HttpOnly`
    /// with no trailing separator.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if key.as_str() == EXPIRES_KEY {
                continue;
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push_str("; ");
        }
        out.push_str("Path=/; ");
        if let Some((_, value)) = self.entries.iter().find(|(k, _)| k.as_str() == EXPIRES_KEY) {
            out.push_str(EXPIRES_KEY);
            out.push('=');
            out.push_str(value);
            out.push_str("; ");
        }
        out.push_str("HttpOnly");
        out
    }

    /// First value for `key`. Absence means "no session" to callers, not
    /// a fatal error.
    pub fn value(&self, key: &str) -> Result<&str, SessionError> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| SessionError::CookieKeyNotFound(key.to_string()))
    }

    /// Append an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Insert or overwrite the `Expires` attribute, formatted as a GMT
    /// timestamp (`Sat, 01 Jan 2000 00:00:00 GMT`).
    pub fn set_expires(&mut self, at: DateTime<Utc>) {
        let stamp = at.format(GMT_FORMAT).to_string();
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == EXPIRES_KEY) {
            Some(entry) => entry.1 = stamp,
            None => self.entries.push((EXPIRES_KEY.to_string(), stamp)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
