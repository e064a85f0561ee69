use crate::jwt::JwtError;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hash cost and token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::from_parts(PasswordHasher::new(), TokenService::new(jwt_secret))
    }

    /// Create an authenticator from configured parts.
    pub fn from_parts(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    /// Create an authenticator with explicit cost and token lifetime in hours.
    pub fn with_settings(jwt_secret: &[u8], cost: HashCost, expiration_hours: i64) -> Self {
        Self::from_parts(
            PasswordHasher::with_cost(cost),
            TokenService::with_ttl(jwt_secret, chrono::Duration::hours(expiration_hours)),
        )
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `account_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Identifier the token will carry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(account_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, account_id: &str) -> Result<String, JwtError> {
        self.token_service.issue(account_id)
    }

    /// Verify a token and return the account identifier it carries.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged or expired
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        self.token_service.verify(token)
    }
}
