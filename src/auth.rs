//! HTTP Basic guard for the admin-only routes.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::routes::AppState;

/// The single username/password pair allowed to mutate data.
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

/// Split an `Authorization: Basic <base64(user:pass)>` header.
fn decode_basic(header: &HeaderValue) -> Option<(String, String)> {
    let (scheme, encoded) = header.to_str().ok()?.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(BASE64.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match request.headers().get(AUTHORIZATION).and_then(decode_basic) {
        Some((username, password)) if state.admin.verify(&username, &password) => {
            Ok(next.run(request).await)
        }
        Some((username, _)) => {
            tracing::warn!(%username, method = %request.method(), uri = %request.uri(), "rejected admin credentials");
            Err(ApiError::Unauthorized)
        }
        None => Err(ApiError::Unauthorized),
    }
}
