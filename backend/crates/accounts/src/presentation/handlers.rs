//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use habits::domain::repository::HabitRepository;

use crate::application::config::AccountsConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase, DeleteAccountUseCase,
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, SignOutUseCase, VerifyEmailInput,
    VerifyEmailUseCase,
};
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::error::AccountResult;
use crate::presentation::dto::{
    ChangePasswordRequest, CheckAuthResponse, DeleteAccountResponse, LoginRequest,
    MessageResponse, RegisterRequest, RegisterResponse, SignedInResponse, VerifyRequest,
};
use kernel::principal::Principal;

/// Shared state for account handlers
pub struct AccountsAppState<R, H, M>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub habit_repo: Arc<H>,
    pub mailer: Arc<M>,
    pub config: Arc<AccountsConfig>,
}

impl<R, H, M> Clone for AccountsAppState<R, H, M>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            habit_repo: self.habit_repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth
pub async fn register<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<Json<RegisterResponse>>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            requested_id: req.id,
        })
        .await?;

    Ok(Json(RegisterResponse {
        message: "Verification code sent".to_string(),
        user_id: output.user_id,
        email: output.email,
    }))
}

// ============================================================================
// Verify email
// ============================================================================

/// POST /auth/verify
pub async fn verify_email<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    Json(req): Json<VerifyRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.habit_repo.clone(),
        state.config.clone(),
    );

    // Owner stamping happens in the sync use case; the placeholder
    // owner on the payload is discarded there.
    let habits = req
        .habits
        .into_iter()
        .map(|p| p.into_habit(&kernel::id::UserId::from_string("")))
        .collect();

    let output = use_case
        .execute(VerifyEmailInput {
            email: req.email,
            code: req.code,
            habits,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignedInResponse {
            message: "Email verified".to_string(),
            user_id: output.user_id,
            name: output.name,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.habit_repo.clone(),
        state.config.clone(),
    );

    let habits = req
        .habits
        .into_iter()
        .map(|p| p.into_habit(&kernel::id::UserId::from_string("")))
        .collect();

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
            habits,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignedInResponse {
            message: "Successful login".to_string(),
            user_id: output.user_id,
            name: output.name,
        }),
    ))
}

// ============================================================================
// Session check
// ============================================================================

/// GET /auth/check
///
/// Never errors: an absent or invalid session answers `isAuth: false`.
pub async fn check_auth<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    headers: HeaderMap,
) -> Json<CheckAuthResponse>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let info = match token {
        Some(token) => use_case.execute(&token).await.ok(),
        None => None,
    };

    match info {
        Some(info) => Json(CheckAuthResponse {
            is_auth: true,
            user_id: Some(info.user_id),
        }),
        None => Json(CheckAuthResponse {
            is_auth: false,
            user_id: None,
        }),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    headers: HeaderMap,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(token.as_deref()).await?;

    let cleared = state.config.cookie_config().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cleared)],
        Json(MessageResponse {
            message: "Successfully logged out".to_string(),
        }),
    ))
}

// ============================================================================
// Change password
// ============================================================================

/// PUT /change-password
pub async fn change_password<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<Json<MessageResponse>>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone());

    use_case
        .execute(
            &principal,
            ChangePasswordInput {
                current_password: req.password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

// ============================================================================
// Delete account
// ============================================================================

/// DELETE /delete-account
pub async fn delete_account<R, H, M>(
    State(state): State<AccountsAppState<R, H, M>>,
    Extension(principal): Extension<Principal>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = DeleteAccountUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.habit_repo.clone(),
    );

    use_case.execute(&principal).await?;

    let cleared = state.config.cookie_config().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cleared)],
        Json(DeleteAccountResponse {
            message: "Account deleted and logged out".to_string(),
            user_id: principal.user_id.into_string(),
        }),
    ))
}
