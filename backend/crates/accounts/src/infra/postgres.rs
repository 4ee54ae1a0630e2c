//! PostgreSQL Repository Implementation
//!
//! One pool-backed type implements the user, verification-code, and
//! session ports so a single handler state can serve all three.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{OtpRecord, Session, User};
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};
use kernel::id::UserId;
use platform::password::HashedPassword;

/// PostgreSQL accounts repository
#[derive(Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    name: String,
    email: String,
    password_hash: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_string(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_phc_string(self.password_hash),
            verified: self.verified,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OtpRow {
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl OtpRow {
    fn into_record(self) -> OtpRecord {
        OtpRecord {
            email: Email::from_db(self.email),
            code: self.code,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            user_id: UserId::from_string(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

// ============================================================================
// UserRepository
// ============================================================================

impl UserRepository for PgAccountsRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, name, email, password_hash, verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.verified)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AccountError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, name, email, password_hash, verified, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, name, email, password_hash, verified, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, password_hash = $3, verified = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.name)
        .bind(user.password_hash.as_phc_string())
        .bind(user.verified)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AccountResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// OtpRepository
// ============================================================================

impl OtpRepository for PgAccountsRepository {
    async fn create(&self, record: &OtpRecord) -> AccountResult<()> {
        // Re-issuing the same code only refreshes its expiry; distinct
        // codes for the same email coexist.
        sqlx::query(
            r#"
            INSERT INTO otp_codes (email, code, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email, code) DO UPDATE SET
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(record.email.as_str())
        .bind(&record.code)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_valid(&self, email: &Email, code: &str) -> AccountResult<Option<OtpRecord>> {
        let row: Option<OtpRow> = sqlx::query_as(
            r#"
            SELECT email, code, expires_at, created_at
            FROM otp_codes
            WHERE email = $1 AND code = $2 AND expires_at > NOW()
            "#,
        )
        .bind(email.as_str())
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OtpRow::into_record))
    }

    async fn delete_all_for_email(&self, email: &Email) -> AccountResult<()> {
        sqlx::query("DELETE FROM otp_codes WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// SessionRepository
// ============================================================================

impl SessionRepository for PgAccountsRepository {
    async fn create(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, user_id, expires_at_ms, created_at, last_activity_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_str())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AccountResult<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT session_id, user_id, expires_at_ms, created_at, last_activity_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn update(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET expires_at_ms = $2, last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AccountResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<()> {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
