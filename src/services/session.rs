//! Admin session gate.
//!
//! A session is the pair `{username, loginTime}` handed to the admin console at
//! login, signed so the console cannot forge it. The gate only compares the
//! login time against a fixed lifetime; there is no refresh and no server-side
//! revocation.

use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
    dev::Payload,
    http::header::AUTHORIZATION,
    web::Data,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::RequestIdExt;

pub const SESSION_COOKIE: &str = "admin_session";
pub const LOGIN_PATH: &str = "/admin/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub username: String,
    /// Unix epoch milliseconds.
    pub login_time: i64,
}

impl AdminSession {
    pub fn new(username: impl Into<String>, login_time: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            login_time: login_time.timestamp_millis(),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.timestamp_millis() - self.login_time < ttl.num_milliseconds()
    }

    pub fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.login_time + ttl.num_milliseconds())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFailure {
    Missing,
    Expired,
    Malformed,
}

impl std::fmt::Display for SessionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionFailure::Missing => write!(f, "missing"),
            SessionFailure::Expired => write!(f, "expired"),
            SessionFailure::Malformed => write!(f, "malformed"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    login_time: i64,
    exp: usize,
}

#[derive(Clone)]
pub struct SessionGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    secure_cookie: bool,
}

impl SessionGate {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            secure_cookie: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut gate = Self::new(&config.jwt_secret, Duration::hours(config.session_ttl_hours));
        gate.secure_cookie = config.is_production();
        gate
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a fresh session for `username` starting at `now`.
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<(String, AdminSession)> {
        let session = AdminSession::new(username, now);
        let claims = SessionClaims {
            sub: session.username.clone(),
            login_time: session.login_time,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok((token, session))
    }

    /// Decide whether `token` is a live session at `now`.
    pub fn check(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, SessionFailure> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(SessionFailure::Missing),
        };

        // Expiry is judged from login_time below, not from the JWT exp claim
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| SessionFailure::Malformed)?
            .claims;

        let session = AdminSession {
            username: claims.sub,
            login_time: claims.login_time,
        };

        if session.username.is_empty() {
            return Err(SessionFailure::Malformed);
        }
        if !session.is_valid_at(now, self.ttl) {
            return Err(SessionFailure::Expired);
        }

        Ok(session)
    }

    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token.to_string())
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish()
    }

    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, "").path("/").finish()
    }
}

/// Bearer token first, then the session cookie.
pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    bearer.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

/// The authenticated admin behind a request. Extracting it runs the gate.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub session: AdminSession,
}

impl AdminContext {
    pub fn username(&self) -> &str {
        &self.session.username
    }
}

impl FromRequest for AdminContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(gate) = req.app_data::<Data<SessionGate>>() else {
            return ready(Err(AppError::internal_server_error_message(
                "Session gate not configured",
            )));
        };

        let token = token_from_request(req);
        let result = gate
            .check(token.as_deref(), Utc::now())
            .map(|session| AdminContext { session })
            .map_err(|failure| {
                log::warn!(
                    "Rejected admin request to {} (correlation_id={}): session {}",
                    req.path(),
                    req.correlation_id().unwrap_or_default(),
                    failure
                );
                AppError::SessionInvalid(failure)
            });

        ready(result)
    }
}
