use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domains::account::models::User;

type HmacSha256 = Hmac<Sha256>;

/// Keyed, time-windowed password reset ticket generator.
///
/// A ticket is `(uid, token)`: uid is the base64url-encoded user id, token is
/// `"{timestamp_base36}-{hmac_hex}"` where the MAC covers the user id, the
/// current password hash and the timestamp. Because the password hash is part
/// of the MAC input, changing the password invalidates every outstanding
/// ticket for that user — no server-side ticket state is needed.
#[derive(Clone)]
pub struct ResetTokenGenerator {
    secret: Vec<u8>,
    ttl_seconds: i64,
}

impl ResetTokenGenerator {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_seconds: ttl_hours * 3600,
        }
    }

    pub fn encode_uid(user_id: i64) -> String {
        URL_SAFE_NO_PAD.encode(user_id.to_string())
    }

    pub fn decode_uid(uid: &str) -> Option<i64> {
        let bytes = URL_SAFE_NO_PAD.decode(uid).ok()?;
        String::from_utf8(bytes).ok()?.parse().ok()
    }

    pub fn make_token(&self, user: &User) -> String {
        self.make_token_at(user, Utc::now().timestamp())
    }

    fn make_token_at(&self, user: &User, timestamp: i64) -> String {
        format!("{}-{}", to_base36(timestamp), self.signature(user, timestamp))
    }

    /// Validate a ticket against the user's current state. Tampered, expired
    /// and malformed tokens are indistinguishable to the caller.
    pub fn check_token(&self, user: &User, token: &str) -> bool {
        let Some((encoded_ts, signature)) = token.split_once('-') else {
            return false;
        };
        let Ok(timestamp) = i64::from_str_radix(encoded_ts, 36) else {
            return false;
        };

        let now = Utc::now().timestamp();
        if timestamp > now || now - timestamp > self.ttl_seconds {
            return false;
        }

        constant_time_eq(
            self.signature(user, timestamp).as_bytes(),
            signature.as_bytes(),
        )
    }

    fn signature(&self, user: &User, timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{}:{}:{}", user.id, user.password_hash, timestamp).as_bytes());
        to_hex(&mac.finalize().into_bytes())
    }
}

fn to_base36(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$old-hash".to_string(),
            name: "A".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn generator() -> ResetTokenGenerator {
        ResetTokenGenerator::new("server-secret", 2)
    }

    #[test]
    fn uid_round_trip() {
        let uid = ResetTokenGenerator::encode_uid(12345);
        assert_eq!(ResetTokenGenerator::decode_uid(&uid), Some(12345));
    }

    #[test]
    fn garbage_uid_decodes_to_none() {
        assert_eq!(ResetTokenGenerator::decode_uid("!!not-base64!!"), None);
        assert_eq!(ResetTokenGenerator::decode_uid(""), None);
        // Valid base64 but not a number.
        let uid = URL_SAFE_NO_PAD.encode("abc");
        assert_eq!(ResetTokenGenerator::decode_uid(&uid), None);
    }

    #[test]
    fn fresh_token_validates() {
        let r#gen = generator();
        let user = test_user();
        let token = r#gen.make_token(&user);
        assert!(r#gen.check_token(&user, &token));
    }

    #[test]
    fn password_change_invalidates_token() {
        let r#gen = generator();
        let mut user = test_user();
        let token = r#gen.make_token(&user);

        user.password_hash = "$argon2id$new-hash".to_string();
        assert!(!r#gen.check_token(&user, &token));
    }

    #[test]
    fn expired_token_is_rejected() {
        let r#gen = generator();
        let user = test_user();
        let stale = Utc::now().timestamp() - 3 * 3600;
        let token = r#gen.make_token_at(&user, stale);
        assert!(!r#gen.check_token(&user, &token));
    }

    #[test]
    fn future_dated_token_is_rejected() {
        let r#gen = generator();
        let user = test_user();
        let future = Utc::now().timestamp() + 600;
        let token = r#gen.make_token_at(&user, future);
        assert!(!r#gen.check_token(&user, &token));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let r#gen = generator();
        let user = test_user();
        let mut token = r#gen.make_token(&user);
        token.pop();
        token.push('0');
        assert!(!r#gen.check_token(&user, &token));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let r#gen = generator();
        let user = test_user();
        assert!(!r#gen.check_token(&user, ""));
        assert!(!r#gen.check_token(&user, "nodash"));
        assert!(!r#gen.check_token(&user, "-justsig"));
    }

    #[test]
    fn token_is_bound_to_user_id() {
        let r#gen = generator();
        let user = test_user();
        let token = r#gen.make_token(&user);

        let mut other = test_user();
        other.id = 8;
        assert!(!r#gen.check_token(&other, &token));
    }

    #[test]
    fn base36_round_trip() {
        for n in [0i64, 1, 35, 36, 1_700_000_000] {
            let encoded = to_base36(n);
            assert_eq!(i64::from_str_radix(&encoded, 36).unwrap(), n);
        }
    }
}
