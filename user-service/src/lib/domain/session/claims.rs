use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::models::Role;
use crate::user::models::User;

/// Who a session token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub subject_id: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            role: user.role,
            subject_id: user.id.to_string(),
        }
    }
}

/// Payload of an access token.
///
/// Field names on the wire match the tokens issued by earlier deployments, so
/// those tokens keep validating until they expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "First_name")]
    pub first_name: String,

    #[serde(rename = "Last_name")]
    pub last_name: String,

    #[serde(rename = "User_type")]
    pub role: Role,

    #[serde(rename = "Uid")]
    pub uid: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `identity`, valid for `ttl` from `issued_at`.
    pub fn new(identity: &Identity, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
            uid: identity.subject_id.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            subject_id: self.uid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::User,
            subject_id: "0190a5b2-0000-7000-8000-000000000001".to_string(),
        }
    }

    #[test]
    fn test_claims_carry_identity_and_expiry() {
        let now = Utc::now();
        let claims = SessionClaims::new(&identity(), now, Duration::hours(24));

        assert_eq!(claims.identity(), identity());
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_wire_field_names() {
        let claims = SessionClaims::new(&identity(), Utc::now(), Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["Email"], "a@x.com");
        assert_eq!(json["First_name"], "Ada");
        assert_eq!(json["Last_name"], "Lovelace");
        assert_eq!(json["User_type"], "USER");
        assert_eq!(json["Uid"], "0190a5b2-0000-7000-8000-000000000001");
        assert!(json["exp"].is_i64());
    }
}
