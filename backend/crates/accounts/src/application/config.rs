//! Application Configuration
//!
//! Configuration for the accounts application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (rolling, 3 days)
    pub session_ttl: Duration,
    /// Verification code TTL (5 minutes)
    pub otp_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "habit_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(3 * 24 * 3600), // 3 days
            otp_ttl: Duration::from_secs(5 * 60),            // 5 minutes
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AccountsConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(3))
    }

    /// OTP TTL as a chrono duration
    pub fn otp_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.otp_ttl).unwrap_or_else(|_| chrono::Duration::minutes(5))
    }

    /// Cookie settings for the session cookie
    pub fn cookie_config(&self) -> platform::cookie::CookieConfig {
        platform::cookie::CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}
