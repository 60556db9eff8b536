use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtError;
use auth::TokenPair;
use chrono::Duration;
use chrono::Utc;

use super::claims::Identity;
use super::claims::SessionClaims;
use crate::user::models::Role;

/// Issues and validates session tokens.
///
/// Access tokens carry the full [`Identity`]; refresh tokens carry only an
/// expiry. Both are signed with the secret held by the shared [`Authenticator`].
pub struct TokenService {
    authenticator: Arc<Authenticator>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_ACCESS_TTL_HOURS: i64 = 24;
    pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 168;

    pub fn new(
        authenticator: Arc<Authenticator>,
        access_ttl_hours: i64,
        refresh_ttl_hours: i64,
    ) -> Self {
        Self {
            authenticator,
            access_ttl: Duration::hours(access_ttl_hours),
            refresh_ttl: Duration::hours(refresh_ttl_hours),
        }
    }

    /// Sign a fresh access/refresh pair for `identity`.
    ///
    /// Expiries are absolute timestamps computed from the current clock.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed; indicates a broken key setup
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, JwtError> {
        let now = Utc::now();
        let access = SessionClaims::new(identity, now, self.access_ttl);
        let refresh = Claims::new().with_expiration((now + self.refresh_ttl).timestamp());

        self.authenticator.issue_pair(&access, &refresh)
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Not signed with this service's secret
    /// * `InvalidFormat` - Not a JWT, or not an access token (refresh tokens land here)
    /// * `Expired` - Past its `exp`
    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.authenticator.validate_token(token)
    }

    /// Sign and validate a throwaway token.
    ///
    /// Run once at startup so a misconfigured key stops the process instead of
    /// failing every login.
    pub fn self_check(&self) -> Result<(), JwtError> {
        let sample = Identity {
            email: "self-check@localhost".to_string(),
            first_name: "self-check".to_string(),
            last_name: "self-check".to_string(),
            role: Role::User,
            subject_id: "self-check".to_string(),
        };
        let token = self
            .authenticator
            .generate_token(&SessionClaims::new(&sample, Utc::now(), self.access_ttl))?;
        self.validate(&token).map(|_| ())
    }
}
