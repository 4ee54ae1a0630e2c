//! Unit tests for accounts crate

mod mailers {
    use std::sync::{Arc, Mutex};

    use crate::domain::mailer::VerificationMailer;
    use crate::domain::value_object::Email;
    use crate::error::{AccountError, AccountResult};

    /// Records the last code instead of sending anything.
    #[derive(Clone, Default)]
    pub struct CapturingMailer {
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl CapturingMailer {
        pub fn last_code(&self) -> Option<String> {
            self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
        }
    }

    impl VerificationMailer for CapturingMailer {
        async fn send_verification_code(
            &self,
            to: &Email,
            _name: &str,
            code: &str,
        ) -> AccountResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.as_str().to_string(), code.to_string()));
            Ok(())
        }
    }

    /// Always fails, simulating an unreachable SMTP server.
    #[derive(Clone, Default)]
    pub struct FailingMailer;

    impl VerificationMailer for FailingMailer {
        async fn send_verification_code(
            &self,
            _to: &Email,
            _name: &str,
            _code: &str,
        ) -> AccountResult<()> {
            Err(AccountError::MailDelivery("connection refused".to_string()))
        }
    }
}

mod register_tests {
    use std::sync::Arc;

    use super::mailers::{CapturingMailer, FailingMailer};
    use crate::application::{AccountsConfig, RegisterInput, RegisterUseCase};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::Email;
    use crate::error::AccountError;
    use crate::infra::memory::InMemoryAccountsRepository;

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            requested_id: None,
        }
    }

    fn use_case(
        repo: Arc<InMemoryAccountsRepository>,
        mailer: CapturingMailer,
    ) -> RegisterUseCase<InMemoryAccountsRepository, InMemoryAccountsRepository, CapturingMailer>
    {
        RegisterUseCase::new(
            repo.clone(),
            repo,
            Arc::new(mailer),
            Arc::new(AccountsConfig::development()),
        )
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_and_sends_code() {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let mailer = CapturingMailer::default();

        let output = use_case(repo.clone(), mailer.clone())
            .execute(input("alice@example.com"))
            .await
            .unwrap();

        let user = repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!user.verified);
        assert_eq!(user.user_id.as_str(), output.user_id);

        let code = mailer.last_code().unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let mailer = CapturingMailer::default();

        use_case(repo.clone(), mailer.clone())
            .execute(input("alice@example.com"))
            .await
            .unwrap();

        let err = use_case(repo, mailer)
            .execute(input("ALICE@Example.COM"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let err = use_case(repo, CapturingMailer::default())
            .execute(input("not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let mut bad = input("alice@example.com");
        bad.password = "short".to_string();

        let err = use_case(repo, CapturingMailer::default())
            .execute(bad)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn test_mail_failure_surfaces_but_keeps_user_row() {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let use_case = RegisterUseCase::new(
            repo.clone(),
            repo.clone(),
            Arc::new(FailingMailer),
            Arc::new(AccountsConfig::development()),
        );

        let err = use_case.execute(input("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AccountError::MailDelivery(_)));

        let user = repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap();
        assert!(user.is_some());
    }
}

mod otp_store_tests {
    use chrono::Duration;

    use crate::domain::entity::OtpRecord;
    use crate::domain::repository::OtpRepository;
    use crate::domain::value_object::Email;
    use crate::infra::memory::InMemoryAccountsRepository;

    #[tokio::test]
    async fn test_resent_codes_coexist_until_purged() {
        let repo = InMemoryAccountsRepository::new();
        let email = Email::new("alice@example.com").unwrap();

        repo.create(&OtpRecord::new(
            email.clone(),
            "111111".to_string(),
            Duration::minutes(5),
        ))
        .await
        .unwrap();
        repo.create(&OtpRecord::new(
            email.clone(),
            "222222".to_string(),
            Duration::minutes(5),
        ))
        .await
        .unwrap();

        assert!(repo.find_valid(&email, "111111").await.unwrap().is_some());
        assert!(repo.find_valid(&email, "222222").await.unwrap().is_some());

        repo.delete_all_for_email(&email).await.unwrap();

        assert!(repo.find_valid(&email, "111111").await.unwrap().is_none());
        assert!(repo.find_valid(&email, "222222").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_code_is_treated_as_absent() {
        let repo = InMemoryAccountsRepository::new();
        let email = Email::new("alice@example.com").unwrap();

        repo.create(&OtpRecord::new(
            email.clone(),
            "111111".to_string(),
            Duration::seconds(-1),
        ))
        .await
        .unwrap();

        assert!(repo.find_valid(&email, "111111").await.unwrap().is_none());
    }
}

mod verify_tests {
    use std::sync::Arc;

    use super::mailers::CapturingMailer;
    use crate::application::session_token::parse_session_token;
    use crate::application::{
        AccountsConfig, RegisterInput, RegisterUseCase, VerifyEmailInput, VerifyEmailUseCase,
    };
    use crate::domain::repository::{SessionRepository, UserRepository};
    use crate::domain::value_object::Email;
    use crate::error::AccountError;
    use crate::infra::memory::InMemoryAccountsRepository;
    use habits::infra::memory::InMemoryHabitRepository;

    struct Fixture {
        repo: Arc<InMemoryAccountsRepository>,
        habit_repo: Arc<InMemoryHabitRepository>,
        mailer: CapturingMailer,
        config: Arc<AccountsConfig>,
    }

    impl Fixture {
        async fn registered(email: &str) -> Self {
            let fixture = Self {
                repo: Arc::new(InMemoryAccountsRepository::new()),
                habit_repo: Arc::new(InMemoryHabitRepository::new()),
                mailer: CapturingMailer::default(),
                config: Arc::new(AccountsConfig::development()),
            };

            RegisterUseCase::new(
                fixture.repo.clone(),
                fixture.repo.clone(),
                Arc::new(fixture.mailer.clone()),
                fixture.config.clone(),
            )
            .execute(RegisterInput {
                name: "Alice".to_string(),
                email: email.to_string(),
                password: "correct horse battery".to_string(),
                requested_id: None,
            })
            .await
            .unwrap();

            fixture
        }

        fn verify(
            &self,
        ) -> VerifyEmailUseCase<
            InMemoryAccountsRepository,
            InMemoryAccountsRepository,
            InMemoryAccountsRepository,
            InMemoryHabitRepository,
        > {
            VerifyEmailUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                self.repo.clone(),
                self.habit_repo.clone(),
                self.config.clone(),
            )
        }

        fn verify_input(&self, email: &str, code: &str) -> VerifyEmailInput {
            VerifyEmailInput {
                email: email.to_string(),
                code: code.to_string(),
                habits: vec![],
            }
        }
    }

    #[tokio::test]
    async fn test_correct_code_verifies_and_establishes_session() {
        let fx = Fixture::registered("alice@example.com").await;
        let code = fx.mailer.last_code().unwrap();

        let output = fx
            .verify()
            .execute(fx.verify_input("alice@example.com", &code))
            .await
            .unwrap();

        let user = fx
            .repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(user.verified);

        // The token must reference a durable session row.
        let session_id =
            parse_session_token(&output.session_token, &fx.config.session_secret).unwrap();
        let session = SessionRepository::find_by_id(fx.repo.as_ref(), session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.user_id.as_str(), output.user_id);
    }

    #[tokio::test]
    async fn test_wrong_code_rejected_and_state_unchanged() {
        let fx = Fixture::registered("alice@example.com").await;
        let code = fx.mailer.last_code().unwrap();
        let wrong = if code == "000000" { "000001" } else { "000000" };

        let err = fx
            .verify()
            .execute(fx.verify_input("alice@example.com", wrong))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCode));

        let user = fx
            .repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!user.verified);

        // The right code still works after a failed attempt.
        fx.verify()
            .execute(fx.verify_input("alice@example.com", &code))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let fx = Fixture::registered("alice@example.com").await;
        let code = fx.mailer.last_code().unwrap();

        fx.verify()
            .execute(fx.verify_input("alice@example.com", &code))
            .await
            .unwrap();

        let err = fx
            .verify()
            .execute(fx.verify_input("alice@example.com", &code))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCode));
    }

    #[tokio::test]
    async fn test_unknown_email_is_unauthorized() {
        let fx = Fixture::registered("alice@example.com").await;

        let err = fx
            .verify()
            .execute(fx.verify_input("bob@example.com", "123456"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_client_habits_sync_on_verify() {
        use habits::application::ListHabitsUseCase;
        use habits::domain::entity::Habit;
        use kernel::id::{HabitId, Id, UserId};
        use kernel::principal::Principal;

        let fx = Fixture::registered("alice@example.com").await;
        let code = fx.mailer.last_code().unwrap();

        let offline_habit = Habit {
            id: HabitId::from_string("h-1"),
            user_id: UserId::from_string(""),
            name: "Stretch".to_string(),
            template: vec![true; 7],
            selected_color: "#4A64FD".to_string(),
            days: Default::default(),
        };

        let output = fx
            .verify()
            .execute(VerifyEmailInput {
                email: "alice@example.com".to_string(),
                code,
                habits: vec![offline_habit],
            })
            .await
            .unwrap();

        let owner = Principal::new(Id::from_string(output.user_id));
        let listed = ListHabitsUseCase::new(fx.habit_repo.clone())
            .execute(&owner)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Stretch");
    }
}

mod login_tests {
    use std::sync::Arc;

    use super::mailers::CapturingMailer;
    use crate::application::{
        AccountsConfig, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
        VerifyEmailInput, VerifyEmailUseCase,
    };
    use crate::error::AccountError;
    use crate::infra::memory::InMemoryAccountsRepository;
    use habits::infra::memory::InMemoryHabitRepository;

    struct Fixture {
        repo: Arc<InMemoryAccountsRepository>,
        habit_repo: Arc<InMemoryHabitRepository>,
        mailer: CapturingMailer,
        config: Arc<AccountsConfig>,
    }

    impl Fixture {
        async fn registered() -> Self {
            let fixture = Self {
                repo: Arc::new(InMemoryAccountsRepository::new()),
                habit_repo: Arc::new(InMemoryHabitRepository::new()),
                mailer: CapturingMailer::default(),
                config: Arc::new(AccountsConfig::development()),
            };

            RegisterUseCase::new(
                fixture.repo.clone(),
                fixture.repo.clone(),
                Arc::new(fixture.mailer.clone()),
                fixture.config.clone(),
            )
            .execute(RegisterInput {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "correct horse battery".to_string(),
                requested_id: None,
            })
            .await
            .unwrap();

            fixture
        }

        async fn verified() -> Self {
            let fixture = Self::registered().await;
            let code = fixture.mailer.last_code().unwrap();

            VerifyEmailUseCase::new(
                fixture.repo.clone(),
                fixture.repo.clone(),
                fixture.repo.clone(),
                fixture.habit_repo.clone(),
                fixture.config.clone(),
            )
            .execute(VerifyEmailInput {
                email: "alice@example.com".to_string(),
                code,
                habits: vec![],
            })
            .await
            .unwrap();

            fixture
        }

        fn login(
            &self,
        ) -> LoginUseCase<
            InMemoryAccountsRepository,
            InMemoryAccountsRepository,
            InMemoryHabitRepository,
        > {
            LoginUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                self.habit_repo.clone(),
                self.config.clone(),
            )
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
            habits: vec![],
        }
    }

    #[tokio::test]
    async fn test_verified_user_can_login() {
        let fx = Fixture::verified().await;

        let output = fx
            .login()
            .execute(login_input("alice@example.com", "correct horse battery"))
            .await
            .unwrap();
        assert_eq!(output.name, "Alice");
        assert!(!output.session_token.is_empty());
    }

    #[tokio::test]
    async fn test_unverified_user_is_forbidden_even_with_correct_password() {
        let fx = Fixture::registered().await;

        let err = fx
            .login()
            .execute(login_input("alice@example.com", "correct horse battery"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::NotVerified));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let fx = Fixture::verified().await;

        let err = fx
            .login()
            .execute(login_input("alice@example.com", "incorrect horse battery"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_is_unauthorized() {
        let fx = Fixture::verified().await;

        let err = fx
            .login()
            .execute(login_input("bob@example.com", "correct horse battery"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }
}

mod account_lifecycle_tests {
    use std::sync::Arc;

    use super::mailers::CapturingMailer;
    use crate::application::session_token::parse_session_token;
    use crate::application::{
        AccountsConfig, ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase,
        DeleteAccountUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
        SignOutUseCase, VerifyEmailInput, VerifyEmailUseCase,
    };
    use crate::domain::repository::SessionRepository;
    use crate::error::AccountError;
    use crate::infra::memory::InMemoryAccountsRepository;
    use habits::application::{ListHabitsUseCase, SyncHabitsUseCase};
    use habits::domain::entity::Habit;
    use habits::infra::memory::InMemoryHabitRepository;
    use kernel::id::{HabitId, Id, UserId};
    use kernel::principal::Principal;

    struct Fixture {
        repo: Arc<InMemoryAccountsRepository>,
        habit_repo: Arc<InMemoryHabitRepository>,
        config: Arc<AccountsConfig>,
        user_id: String,
        session_token: String,
    }

    async fn signed_up() -> Fixture {
        let repo = Arc::new(InMemoryAccountsRepository::new());
        let habit_repo = Arc::new(InMemoryHabitRepository::new());
        let mailer = CapturingMailer::default();
        let config = Arc::new(AccountsConfig::development());

        RegisterUseCase::new(
            repo.clone(),
            repo.clone(),
            Arc::new(mailer.clone()),
            config.clone(),
        )
        .execute(RegisterInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "correct horse battery".to_string(),
            requested_id: None,
        })
        .await
        .unwrap();

        let code = mailer.last_code().unwrap();
        let output = VerifyEmailUseCase::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            habit_repo.clone(),
            config.clone(),
        )
        .execute(VerifyEmailInput {
            email: "alice@example.com".to_string(),
            code,
            habits: vec![],
        })
        .await
        .unwrap();

        Fixture {
            repo,
            habit_repo,
            config,
            user_id: output.user_id,
            session_token: output.session_token,
        }
    }

    fn habit(id: &str, name: &str) -> Habit {
        Habit {
            id: HabitId::from_string(id),
            user_id: UserId::from_string(""),
            name: name.to_string(),
            template: vec![true; 7],
            selected_color: "#4A64FD".to_string(),
            days: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_change_password_rotates_credentials() {
        let fx = signed_up().await;
        let principal = Principal::new(Id::from_string(fx.user_id.clone()));

        ChangePasswordUseCase::new(fx.repo.clone())
            .execute(
                &principal,
                ChangePasswordInput {
                    current_password: "correct horse battery".to_string(),
                    new_password: "staple battery horse".to_string(),
                },
            )
            .await
            .unwrap();

        let login = LoginUseCase::new(
            fx.repo.clone(),
            fx.repo.clone(),
            fx.habit_repo.clone(),
            fx.config.clone(),
        );

        let err = login
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "correct horse battery".to_string(),
                habits: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        login
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "staple battery horse".to_string(),
                habits: vec![],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let fx = signed_up().await;
        let principal = Principal::new(Id::from_string(fx.user_id.clone()));

        let err = ChangePasswordUseCase::new(fx.repo.clone())
            .execute(
                &principal,
                ChangePasswordInput {
                    current_password: "guessed wrong".to_string(),
                    new_password: "staple battery horse".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_session_check_and_sign_out() {
        let fx = signed_up().await;
        let check = CheckSessionUseCase::new(fx.repo.clone(), fx.config.clone());

        let info = check.execute(&fx.session_token).await.unwrap();
        assert_eq!(info.user_id, fx.user_id);

        SignOutUseCase::new(fx.repo.clone(), fx.config.clone())
            .execute(Some(&fx.session_token))
            .await
            .unwrap();

        let err = check.execute(&fx.session_token).await.unwrap_err();
        assert!(matches!(err, AccountError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_sign_out_tolerates_garbage_tokens() {
        let fx = signed_up().await;
        let sign_out = SignOutUseCase::new(fx.repo.clone(), fx.config.clone());

        sign_out.execute(None).await.unwrap();
        sign_out.execute(Some("not.a-token")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_account_removes_habits_sessions_and_user() {
        let fx = signed_up().await;
        let principal = Principal::new(Id::from_string(fx.user_id.clone()));

        SyncHabitsUseCase::new(fx.habit_repo.clone())
            .execute(&principal, vec![habit("h-1", "Read"), habit("h-2", "Run")])
            .await
            .unwrap();

        DeleteAccountUseCase::new(
            fx.repo.clone(),
            fx.repo.clone(),
            fx.repo.clone(),
            fx.habit_repo.clone(),
        )
        .execute(&principal)
        .await
        .unwrap();

        let listed = ListHabitsUseCase::new(fx.habit_repo.clone())
            .execute(&principal)
            .await
            .unwrap();
        assert!(listed.is_empty());

        let session_id =
            parse_session_token(&fx.session_token, &fx.config.session_secret).unwrap();
        assert!(fx.repo.find_by_id(session_id).await.unwrap().is_none());

        // The freed email can register again.
        let mailer = CapturingMailer::default();
        RegisterUseCase::new(
            fx.repo.clone(),
            fx.repo.clone(),
            Arc::new(mailer),
            fx.config.clone(),
        )
        .execute(RegisterInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "correct horse battery".to_string(),
            requested_id: None,
        })
        .await
        .unwrap();
    }
}
