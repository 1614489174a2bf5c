//! Anti-forgery tokens for the public and admin forms.
//!
//! A token is an HMAC-SHA256 over `tick|action|session`, truncated to
//! [`TOKEN_HEX_LENGTH`] hex characters. The tick advances every half
//! lifetime and tokens from the current or the previous tick are accepted,
//! so a rendered form stays submittable for between one half and one full
//! lifetime.

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of hex characters in an issued token.
pub const TOKEN_HEX_LENGTH: usize = 10;

/// Default token lifetime (one day).
pub const DEFAULT_LIFETIME_SECS: i64 = 86_400;

/// Length of a generated anonymous session identifier.
pub const SESSION_ID_LENGTH: usize = 32;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Issuer
// ---------------------------------------------------------------------------

/// Issues and verifies action-scoped, session-scoped tokens.
#[derive(Clone)]
pub struct NonceIssuer {
    key: Vec<u8>,
    lifetime_secs: i64,
}

impl std::fmt::Debug for NonceIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceIssuer")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl NonceIssuer {
    /// Create an issuer. Lifetimes shorter than two seconds are raised to two
    /// so the tick length is never zero.
    pub fn new(secret: impl AsRef<[u8]>, lifetime_secs: i64) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
            lifetime_secs: lifetime_secs.max(2),
        }
    }

    /// Token for `action` in `session`, valid from now.
    pub fn issue(&self, action: &str, session: &str) -> String {
        self.issue_at(action, session, Utc::now())
    }

    /// Token for `action` in `session` as it would be issued at `now`.
    pub fn issue_at(&self, action: &str, session: &str, now: Timestamp) -> String {
        let tag = self.mac(self.tick(now), action, session).finalize().into_bytes();
        hex::encode(&tag[..TOKEN_HEX_LENGTH / 2])
    }

    /// Whether `token` was issued for `action` in `session` within the
    /// accepted window.
    pub fn verify(&self, token: &str, action: &str, session: &str) -> bool {
        self.verify_at(token, action, session, Utc::now())
    }

    /// [`verify`](Self::verify) against an explicit clock.
    pub fn verify_at(&self, token: &str, action: &str, session: &str, now: Timestamp) -> bool {
        if token.len() != TOKEN_HEX_LENGTH {
            return false;
        }
        let Some(tag) = hex::decode(token) else {
            return false;
        };
        let tick = self.tick(now);
        [tick, tick - 1].into_iter().any(|t| {
            self.mac(t, action, session)
                .verify_truncated_left(&tag)
                .is_ok()
        })
    }

    fn tick(&self, now: Timestamp) -> i64 {
        now.timestamp().div_euclid(self.lifetime_secs / 2) + 1
    }

    fn mac(&self, tick: i64, action: &str, session: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(format!("{tick}|{action}|{session}").as_bytes());
        mac
    }
}

/// Session key of an authenticated admin user.
pub fn user_session(user_id: crate::types::DbId) -> String {
    format!("user:{user_id}")
}

/// Generate a random identifier for an anonymous visitor session.
pub fn new_session_id() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SESSION_ID_LENGTH)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// hex helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode an even-length hex string, `None` on any invalid digit.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn issuer() -> NonceIssuer {
        NonceIssuer::new("test-secret", 3600)
    }

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn issued_token_has_expected_shape() {
        let token = issuer().issue("lead_save", "abc");
        assert_eq!(token.len(), TOKEN_HEX_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_verifies_for_same_action_and_session() {
        let issuer = issuer();
        let token = issuer.issue_at("lead_save", "abc", at(0));
        assert!(issuer.verify_at(&token, "lead_save", "abc", at(10)));
    }

    #[test]
    fn token_is_scoped_to_action() {
        let issuer = issuer();
        let token = issuer.issue_at("lead_save", "abc", at(0));
        assert!(!issuer.verify_at(&token, "lead_edit", "abc", at(0)));
    }

    #[test]
    fn token_is_scoped_to_session() {
        let issuer = issuer();
        let token = issuer.issue_at("lead_save", "abc", at(0));
        assert!(!issuer.verify_at(&token, "lead_save", "xyz", at(0)));
    }

    #[test]
    fn token_is_scoped_to_secret() {
        let token = issuer().issue_at("lead_save", "abc", at(0));
        let other = NonceIssuer::new("another-secret", 3600);
        assert!(!other.verify_at(&token, "lead_save", "abc", at(0)));
    }

    #[test]
    fn token_survives_into_next_tick_only() {
        let issuer = issuer();
        let issued = at(0);
        let token = issuer.issue_at("lead_save", "abc", issued);
        assert!(issuer.verify_at(&token, "lead_save", "abc", issued + Duration::seconds(1800)));
        assert!(!issuer.verify_at(&token, "lead_save", "abc", issued + Duration::seconds(3601)));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let issuer = issuer();
        for token in ["", "zzzzzzzzzz", "0123", "0123456789abcdef", "éééééééééé"] {
            assert!(!issuer.verify_at(token, "lead_save", "abc", at(0)), "{token:?}");
        }
    }

    #[test]
    fn session_ids_are_random_alphanumeric() {
        let a = new_session_id();
        let b = new_session_id();
        assert_eq!(a.len(), SESSION_ID_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
