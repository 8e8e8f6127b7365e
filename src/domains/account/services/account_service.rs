use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{TimeZone, Utc};

use crate::domains::account::models::{
    Claims, PasswordChangeRequest, PasswordResetConfirmRequest, RegisterRequest, TokenRequest,
    User,
};
use crate::domains::account::services::{ResetTokenGenerator, TokenService};
use crate::shared::database::{BlacklistRepository, CreateUserOutcome, Database, UserRepository};
use crate::shared::errors::{ApiError, FieldErrors};
use crate::shared::mailer::Mailer;
use crate::shared::utils::PasswordPolicy;

const DUPLICATE_EMAIL: &str = "A user with this email already exists.";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account business logic: registration, credential login, refresh-token
/// lifecycle and the password change/reset flows.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
    token_service: TokenService,
    reset_tokens: ResetTokenGenerator,
    policy: PasswordPolicy,
    mailer: Arc<dyn Mailer>,
    reset_url_base: String,
}

impl AccountService {
    pub fn new(
        db: Database,
        token_service: TokenService,
        reset_tokens: ResetTokenGenerator,
        mailer: Arc<dyn Mailer>,
        reset_url_base: String,
    ) -> Self {
        Self {
            db,
            token_service,
            reset_tokens,
            policy: PasswordPolicy::default(),
            mailer,
            reset_url_base,
        }
    }

    fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.db.pool().clone())
    }

    fn blacklist_repo(&self) -> BlacklistRepository {
        BlacklistRepository::new(self.db.pool().clone())
    }

    /// Register a new account. Validation failures are collected per field
    /// rather than short-circuited, so a weak password and a taken email
    /// come back together.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        let email = request.email.trim().to_lowercase();
        let name = request.name.trim().to_string();

        let mut errors = FieldErrors::new();
        let email_ok = is_valid_email(&email);
        if !email_ok {
            errors.push("email", "Enter a valid email address.");
        }
        errors.extend("password", self.policy.validate(&request.password));
        if name.is_empty() {
            errors.push("name", "This field may not be blank.");
        }

        let user_repo = self.user_repo();
        if email_ok {
            let existing = user_repo.find_by_email(&email).await.map_err(db_error)?;
            if existing.is_some() {
                errors.push("email", DUPLICATE_EMAIL);
            }
        }
        errors.into_result()?;

        let password_hash = Self::hash_password(&request.password)?;
        match user_repo
            .create_user(&email, &password_hash, &name)
            .await
            .map_err(db_error)?
        {
            CreateUserOutcome::Created(user) => Ok(user),
            // Lost the uniqueness race to a concurrent registration.
            CreateUserOutcome::DuplicateEmail => {
                Err(ApiError::Validation(FieldErrors::field("email", DUPLICATE_EMAIL)))
            }
        }
    }

    /// Verify credentials and issue an (access, refresh) pair. Unknown email
    /// and wrong password fail identically.
    pub async fn login(&self, request: TokenRequest) -> Result<(String, String), ApiError> {
        let email = request.email.trim().to_lowercase();
        let user = self
            .user_repo()
            .find_by_email(&email)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !Self::password_matches(&request.password, &user.password_hash) {
            return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        self.token_service.issue_pair(&user)
    }

    /// Full refresh-token verification: signature, expiry, token type and
    /// the blacklist, in one step. A blacklisted token fails exactly like a
    /// malformed one.
    pub async fn verify_refresh(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.token_service.decode_refresh(token)?;
        let jti = claims.jti.ok_or_else(ApiError::invalid_token)?;

        if self.blacklist_repo().contains(jti).await.map_err(db_error)? {
            return Err(ApiError::invalid_token());
        }

        Ok(claims)
    }

    /// Mint a fresh access token from a valid refresh token.
    pub async fn refresh_access_token(&self, refresh: &str) -> Result<String, ApiError> {
        let claims = self.verify_refresh(refresh).await?;

        // The account must still exist; a deleted user's refresh token is dead.
        let user = self
            .user_repo()
            .find_by_id(claims.user_id)
            .await
            .map_err(db_error)?
            .ok_or_else(ApiError::invalid_token)?;

        self.token_service.issue_access(user.id, user.email)
    }

    /// Revoke a refresh token by blacklisting its jti. Verification happens
    /// first, so a second revocation of the same token fails the same way a
    /// forged token would.
    pub async fn logout(&self, refresh: &str) -> Result<(), ApiError> {
        let claims = self
            .token_service
            .decode_refresh(refresh)
            .map_err(|_| ApiError::blacklisted())?;
        let jti = claims.jti.ok_or_else(ApiError::blacklisted)?;

        let blacklist = self.blacklist_repo();
        if blacklist.contains(jti).await.map_err(db_error)? {
            return Err(ApiError::blacklisted());
        }

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or_else(Utc::now);
        blacklist
            .insert(jti, claims.user_id, expires_at)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.user_repo()
            .find_by_id(user_id)
            .await
            .map_err(db_error)?
            .ok_or_else(ApiError::invalid_token)
    }

    /// Update the caller's profile. Email is read-only.
    pub async fn update_profile(
        &self,
        user_id: i64,
        name: Option<String>,
    ) -> Result<User, ApiError> {
        let Some(name) = name else {
            return self.get_user(user_id).await;
        };

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation(FieldErrors::field(
                "name",
                "This field may not be blank.",
            )));
        }

        self.user_repo()
            .update_name(user_id, &name)
            .await
            .map_err(db_error)?
            .ok_or_else(ApiError::invalid_token)
    }

    /// Change password for an authenticated user. Requires the old password;
    /// both the old-password check and the new-password policy report as
    /// field-level errors. The write is conditioned on the hash the old
    /// password was verified against, so a concurrent credential change
    /// cannot be overwritten by a validation that no longer holds.
    pub async fn set_password(
        &self,
        user_id: i64,
        request: PasswordChangeRequest,
    ) -> Result<(), ApiError> {
        let user = self.get_user(user_id).await?;

        let mut errors = FieldErrors::new();
        if !Self::password_matches(&request.old_password, &user.password_hash) {
            errors.push("old_password", "Old password is incorrect.");
        }
        errors.extend("new_password", self.policy.validate(&request.new_password));
        errors.into_result()?;

        let new_hash = Self::hash_password(&request.new_password)?;
        let swapped = self
            .user_repo()
            .set_password_hash_if(user.id, &new_hash, &user.password_hash)
            .await
            .map_err(db_error)?;
        if !swapped {
            // The stored hash moved between validation and write; the
            // credential we checked is no longer current.
            return Err(ApiError::Validation(FieldErrors::field(
                "old_password",
                "Old password is incorrect.",
            )));
        }

        Ok(())
    }

    /// Issue a reset ticket and hand it to the mailer. The outcome is
    /// identical whether or not the email is registered, so the endpoint
    /// cannot be used to probe for accounts.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let email = email.trim().to_lowercase();
        let user = self
            .user_repo()
            .find_by_email(&email)
            .await
            .map_err(db_error)?;

        if let Some(user) = user {
            let uid = ResetTokenGenerator::encode_uid(user.id);
            let token = self.reset_tokens.make_token(&user);
            let link = format!("{}?uid={uid}&token={token}", self.reset_url_base);
            let body = format!("Use this link to reset your password: {link}");

            if let Err(e) = self.mailer.send(&user.email, "Password reset", &body).await {
                // Delivery failure must not change the response either.
                tracing::warn!("password reset mail failed: {e:#}");
            }
        }

        Ok(())
    }

    /// Confirm a reset ticket and set the new password. The write is a
    /// compare-and-swap on the old hash: if the hash changed since the
    /// ticket was validated, the ticket is stale and the request fails.
    pub async fn confirm_password_reset(
        &self,
        request: PasswordResetConfirmRequest,
    ) -> Result<(), ApiError> {
        let user_id =
            ResetTokenGenerator::decode_uid(&request.uid).ok_or(ApiError::InvalidResetTicket)?;

        let user_repo = self.user_repo();
        let user = user_repo
            .find_by_id(user_id)
            .await
            .map_err(db_error)?
            .ok_or(ApiError::InvalidResetTicket)?;

        if !self.reset_tokens.check_token(&user, &request.token) {
            return Err(ApiError::InvalidResetTicket);
        }

        let mut errors = FieldErrors::new();
        errors.extend("new_password", self.policy.validate(&request.new_password));
        errors.into_result()?;

        let new_hash = Self::hash_password(&request.new_password)?;
        let swapped = user_repo
            .set_password_hash_if(user.id, &new_hash, &user.password_hash)
            .await
            .map_err(db_error)?;
        if !swapped {
            return Err(ApiError::InvalidResetTicket);
        }

        Ok(())
    }

    fn hash_password(password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?
            .to_string();

        Ok(hash)
    }

    fn password_matches(password: &str, password_hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

fn db_error(e: anyhow::Error) -> ApiError {
    ApiError::Database(format!("{e:#}"))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_differs_from_plaintext_and_verifies() {
        let hash = AccountService::hash_password("Sup3rSecret!").unwrap();
        assert_ne!(hash, "Sup3rSecret!");
        assert!(AccountService::password_matches("Sup3rSecret!", &hash));
        assert!(!AccountService::password_matches("wrong", &hash));
    }

    #[test]
    fn two_hashes_of_same_password_differ() {
        // Salted hashing: equal inputs must not produce equal stored values.
        let a = AccountService::hash_password("Sup3rSecret!").unwrap();
        let b = AccountService::hash_password("Sup3rSecret!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_never_matches() {
        assert!(!AccountService::password_matches("anything", "not-a-phc-string"));
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
    }
}
