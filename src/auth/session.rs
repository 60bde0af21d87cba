use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use std::convert::Infallible;
use tracing::debug;
use crate::config::SessionConfig;
use crate::domain::{Role, User};

/// Identity carried by the signed session cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    fn encode(&self) -> String {
        let role = match self.role {
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
        };
        format!("{}|{}", self.user_id, role)
    }

    fn decode(value: &str) -> Option<Self> {
        let (user_id, role) = value.split_once('|')?;
        let role = match role {
            "CUSTOMER" => Role::Customer,
            "ADMIN" => Role::Admin,
            _ => return None,
        };
        Some(Self { user_id: user_id.to_string(), role })
    }
}

/// Cookie attributes, shared by every handler that starts or ends a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
    pub remember_days: i64,
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            secure: config.secure,
            remember_days: config.remember_days,
        }
    }
}

impl SessionSettings {
    /// Adds the session cookie. `remember` makes it outlive the browser session.
    pub fn start(&self, jar: SignedCookieJar, user: &User, remember: bool) -> SignedCookieJar {
        let session = Session { user_id: user.id.clone(), role: user.role };
        let mut cookie = Cookie::build((self.cookie_name.clone(), session.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if remember {
            cookie = cookie.max_age(time::Duration::days(self.remember_days));
        }
        debug!(user_id = %user.id, remember, "Session started");
        jar.add(cookie.build())
    }

    pub fn end(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/").build())
    }
}

/// Per-request view of who is asking. Resolved once by the extractor and
/// handed to every handler explicitly.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session: Option<Session>,
    /// Path and query of the request, used as the post-login destination.
    pub path: String,
}

impl RequestContext {
    #[cfg(test)]
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self { session: None, path: path.into() }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionSettings: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let settings = SessionSettings::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
        // A tampered or stale cookie fails verification and reads as anonymous.
        let session = jar
            .get(&settings.cookie_name)
            .and_then(|cookie| Session::decode(cookie.value()));
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        Ok(Self { session, path })
    }
}
