use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and verifies signed, expiring account tokens.
///
/// Stateless: nothing is stored server-side and verification performs no
/// I/O, only the HMAC check and a clock comparison.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenService {
    /// Default validity window of an issued token.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create a token service with the default 24 hour validity window.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Create a token service with a custom validity window.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Issue a token for `account_id`, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(&self, account_id: &str) -> Result<String, JwtError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a token as if the current instant were `issued_at`.
    pub fn issue_at(&self, account_id: &str, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_account(account_id, issued_at, self.ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token and return the account identifier it carries.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is malformed
    /// * `InvalidToken` - Signature does not validate or subject is empty
    /// * `TokenExpired` - Expiration instant is in the past
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock reading `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        if claims.sub.is_empty() {
            return Err(JwtError::InvalidToken("Missing subject".to_string()));
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(SECRET);

        let token = service.issue("acc123").expect("Failed to issue token");
        let account_id = service.verify(&token).expect("Failed to verify token");

        assert_eq!(account_id, "acc123");
    }

    #[test]
    fn test_expiry_boundary() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let token = service.issue_at("acc123", issued_at).unwrap();

        let almost = issued_at + Duration::hours(23) + Duration::minutes(59);
        assert_eq!(service.verify_at(&token, almost).unwrap(), "acc123");

        let after = issued_at + Duration::hours(24) + Duration::seconds(1);
        assert_eq!(
            service.verify_at(&token, after),
            Err(JwtError::TokenExpired)
        );

        let much_later = issued_at + Duration::days(3);
        assert_eq!(
            service.verify_at(&token, much_later),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_custom_ttl() {
        let service = TokenService::with_ttl(SECRET, Duration::minutes(5));
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let token = service.issue_at("acc", issued_at).unwrap();

        assert!(service.verify_at(&token, issued_at + Duration::minutes(5)).is_ok());
        assert!(service
            .verify_at(&token, issued_at + Duration::minutes(6))
            .is_err());
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = TokenService::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("acc123").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_malformed() {
        let service = TokenService::new(SECRET);

        for token in ["", "abc", "a.b", "invalid.token.here"] {
            assert!(service.verify(token).is_err(), "{token:?}");
        }
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let service = TokenService::new(SECRET);
        let token = service.issue("acc123").unwrap();
        let other = service.issue("acc456").unwrap();

        // Header and signature of one token, payload of the other
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(
            service.verify(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
