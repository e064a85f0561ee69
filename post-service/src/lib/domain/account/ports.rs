use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginResult;
use crate::domain::account::models::SignUpCommand;

/// Port for account credential operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created account (the caller must not echo `password_hash`)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `Hashing` - Password hashing failed
    /// * `Repository` - Email already registered or storage failure
    async fn sign_up(&self, command: SignUpCommand) -> Result<Account, AccountError>;

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `Token` - Token generation failed
    /// * `Repository` - Storage failure
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AccountError>;
}
