use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claim set shared by access and refresh tokens. Refresh tokens carry a
/// jti so individual tokens can be revoked through the blacklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub token_type: String,

    /// Unique token identifier; present on refresh tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<Uuid>,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp, exclusive).
    pub exp: i64,
}

impl Claims {
    pub fn access(user_id: i64, email: String, lifetime: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            email,
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            jti: None,
            iat: now,
            exp: now + lifetime.num_seconds(),
        }
    }

    pub fn refresh(user_id: i64, email: String, lifetime: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            email,
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            jti: Some(Uuid::new_v4()),
            iat: now,
            exp: now + lifetime.num_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_claims_have_no_jti() {
        let claims = Claims::access(1, "a@x.com".to_string(), Duration::minutes(15));
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.jti.is_none());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn refresh_claims_carry_fresh_jti() {
        let a = Claims::refresh(1, "a@x.com".to_string(), Duration::days(7));
        let b = Claims::refresh(1, "a@x.com".to_string(), Duration::days(7));
        assert_eq!(a.token_type, TOKEN_TYPE_REFRESH);
        assert!(a.jti.is_some());
        assert_ne!(a.jti, b.jti);
    }
}
