use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domains::account::models::{Claims, User, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::shared::errors::ApiError;

/// Issues and verifies the signed access/refresh token pair.
///
/// Stateless by design: revocation state lives in the blacklist, consulted
/// by the account service as part of refresh-token verification.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_minutes: i64, refresh_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            access_lifetime: Duration::minutes(access_minutes),
            refresh_lifetime: Duration::days(refresh_days),
        }
    }

    /// Issue an (access, refresh) pair for a user. The refresh token carries
    /// a fresh jti.
    pub fn issue_pair(&self, user: &User) -> Result<(String, String), ApiError> {
        let access = self.issue_access(user.id, user.email.clone())?;
        let refresh = self.sign(&Claims::refresh(
            user.id,
            user.email.clone(),
            self.refresh_lifetime,
        ))?;
        Ok((access, refresh))
    }

    pub fn issue_access(&self, user_id: i64, email: String) -> Result<String, ApiError> {
        self.sign(&Claims::access(user_id, email, self.access_lifetime))
    }

    /// Verify an access token: signature, expiry and token type.
    pub fn verify_access(&self, token: &str) -> Result<Claims, ApiError> {
        self.decode_checked(token, TOKEN_TYPE_ACCESS)
    }

    /// Structural verification of a refresh token. The blacklist lookup is
    /// the account service's half of `verify_refresh`; both failures surface
    /// to clients as the same invalid-token category.
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.decode_checked(token, TOKEN_TYPE_REFRESH)?;
        // A refresh token without a jti cannot be revoked; treat it as malformed.
        if claims.jti.is_none() {
            return Err(ApiError::invalid_token());
        }
        Ok(claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {e}")))
    }

    fn decode_checked(&self, token: &str, expected_type: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        // The expiry instant itself is exclusive; no leeway.
        validation.leeway = 0;

        // Signature, structure and expiry failures all collapse into one
        // category so callers get no verification oracle.
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| ApiError::invalid_token())?;

        if data.claims.token_type != expected_type {
            return Err(ApiError::invalid_token());
        }

        Ok(data.claims)
    }
}
