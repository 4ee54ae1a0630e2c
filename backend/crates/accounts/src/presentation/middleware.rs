//! Session Gate Middleware
//!
//! Verifies the session cookie and injects a `Principal` into request
//! extensions. Gated routes never reach their handler without one.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AccountsConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AccountError;
use kernel::principal::Principal;

/// Middleware state
pub struct SessionGateState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

impl<R> Clone for SessionGateState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that requires a valid session
///
/// On success the request carries a `Principal` extension and the
/// response carries a refreshed cookie (rolling expiry).
pub async fn require_session<R>(
    State(state): State<SessionGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let Some(token) = token else {
        return Err(AccountError::SessionInvalid.into_response());
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .get_session(&token)
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut()
        .insert(Principal::new(session.user_id.clone()));

    let mut response = next.run(req).await;

    // Mirror the rolling server-side extension on the cookie itself,
    // unless the handler already set it (logout, account deletion).
    let cookie_prefix = format!("{}=", state.config.session_cookie_name);
    let already_set = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|v| v.to_str().is_ok_and(|v| v.starts_with(&cookie_prefix)));

    if !already_set {
        let refreshed = state.config.cookie_config().build_set_cookie(&token);
        if let Ok(value) = header::HeaderValue::from_str(&refreshed) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}
