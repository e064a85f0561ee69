use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginResult;
use crate::domain::account::models::SignUpCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::ports::Repository;

/// Domain service implementation for sign-up and login.
pub struct AccountService<R>
where
    R: Repository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
}

impl<R> AccountService<R>
where
    R: Repository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Active storage backend
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: Repository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Account, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
        };

        self.repository.insert_account(&account).await?;

        tracing::info!(account_id = %account.id, "Account created");

        Ok(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AccountError> {
        // A malformed email cannot belong to anyone
        let email = match EmailAddress::new(command.email) {
            Ok(email) => email,
            Err(_) => return Err(AccountError::InvalidCredentials),
        };

        let account = self
            .repository
            .get_account_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &account.password_hash,
                &account.id.to_string(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(account_id = %account.id, "Stored password hash is unreadable: {}", err);
                    AccountError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AccountError::Token(err.to_string()),
            })?;

        Ok(LoginResult {
            account_id: account.id,
            token: result.access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use auth::HashCost;

    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::ports::mocks::MockTestRepository;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::with_settings(
            SECRET,
            HashCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            24,
        ))
    }

    fn stored_account(authenticator: &Authenticator, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut repository = MockTestRepository::new();

        repository
            .expect_insert_account()
            .withf(|account| {
                account.email.as_str() == "alice@example.com"
                    && account.password_hash.starts_with("$argon2id")
                    && !account.password_hash.contains("password123")
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let account = service.sign_up(command).await.unwrap();
        assert_eq!(account.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_sign_up_empty_password() {
        let mut repository = MockTestRepository::new();
        repository.expect_insert_account().times(0);

        let service = AccountService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            String::new(),
        );

        let result = service.sign_up(command).await;
        assert!(matches!(result, Err(AccountError::EmptyPassword)));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut repository = MockTestRepository::new();

        repository.expect_insert_account().times(1).returning(|account| {
            Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                account.email
            )))
        });

        let service = AccountService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let result = service.sign_up(command).await;
        assert!(matches!(
            result,
            Err(AccountError::Repository(RepositoryError::Conflict(_)))
        ));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_account() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "password123");
        let account_id = account.id;

        let mut repository = MockTestRepository::new();
        repository
            .expect_get_account_by_email()
            .withf(|email| email.as_str() == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), Arc::clone(&authenticator));

        let result = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.account_id, account_id);
        assert_eq!(
            authenticator.verify_token(&result.token).unwrap(),
            account_id.to_string()
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "password123");

        let mut repository = MockTestRepository::new();
        repository
            .expect_get_account_by_email()
            .returning(move |email| {
                if email.as_str() == "alice@example.com" {
                    Ok(Some(account.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = AccountService::new(Arc::new(repository), authenticator);

        let wrong_password = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        let unknown_email = service
            .login(LoginCommand {
                email: "bob@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert!(matches!(unknown_email, AccountError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_storage_failure_is_not_masked() {
        let mut repository = MockTestRepository::new();
        repository
            .expect_get_account_by_email()
            .returning(|_| Err(RepositoryError::Storage("connection reset".to_string())));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(AccountError::Repository(RepositoryError::Storage(_)))
        ));
    }
}
