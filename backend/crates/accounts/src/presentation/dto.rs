//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use habits::presentation::dto::HabitPayload;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Account id minted on the device, kept when present
    #[serde(default)]
    pub id: Option<String>,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub email: String,
}

// ============================================================================
// Verify email
// ============================================================================

/// Verify email request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
    /// Habits accumulated on the device before the account existed
    #[serde(default)]
    pub habits: Vec<HabitPayload>,
}

/// Response for verify and login: the signed-in user summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInResponse {
    pub message: String,
    pub user_id: String,
    pub name: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub habits: Vec<HabitPayload>,
}

// ============================================================================
// Session check
// ============================================================================

/// Session check response; never an error, even without a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAuthResponse {
    pub is_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

// ============================================================================
// Password change / account deletion / logout
// ============================================================================

/// Change password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password
    pub password: String,
    pub new_password: String,
}

/// Generic message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

/// Account deletion response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountResponse {
    pub message: String,
    pub user_id: String,
}
