use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered JWT claims.
///
/// Every field is optional and omitted from the encoded token when absent, so a
/// claim set built with only an expiration encodes to `{"exp": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims carrying only an expiration `hours` from now.
    pub fn expiring_in(hours: i64) -> Self {
        let expiration = Utc::now() + Duration::hours(hours);
        Self::new().with_expiration(expiration.timestamp())
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_are_empty() {
        let claims = Claims::new();
        assert!(claims.sub.is_none());
        assert!(claims.exp.is_none());
        assert!(claims.iat.is_none());
    }

    #[test]
    fn test_expiring_in() {
        let before = Utc::now().timestamp();
        let claims = Claims::expiring_in(168);

        let exp = claims.exp.unwrap();
        assert!(exp >= before + 168 * 60 * 60);
        assert!(claims.sub.is_none());
        assert!(claims.iat.is_none());
    }

    #[test]
    fn test_expiration_only_serializes_exp() {
        let claims = Claims::new().with_expiration(1234567890);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json, serde_json::json!({ "exp": 1234567890 }));
    }
}
