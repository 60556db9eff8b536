use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PhoneError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` always holds a PHC hash string; plaintext passwords only
/// exist as [`Password`] values on their way into the hasher.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: PhoneNumber,
    pub role: Role,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
///
/// Generated ids are UUID v7, so they sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new time-ordered user ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, 2-100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    /// * `TooLong` - More than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number value type
///
/// Required, and restricted to digits, spaces and `+ - ( ) .`. Uniqueness is
/// decided on the exact stored text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();
        if phone.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'))
        {
            return Err(PhoneError::InvalidCharacters);
        }
        Ok(Self(phone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Plaintext password in transit.
///
/// `Debug` never prints the contents.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Enforce the signup password policy.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn validated(self) -> Result<Self, PasswordPolicyError> {
        let length = self.0.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct NewUserCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: PhoneNumber,
    pub role: Role,
}

/// Login credentials as submitted; the email is looked up verbatim.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: Password,
}

/// Acknowledgment returned by a successful signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedUser {
    pub inserted_id: UserId,
}

/// Which slice of the user listing to return.
///
/// Out-of-range inputs fall back to defaults rather than failing: a missing or
/// non-positive page size becomes 10, a missing or non-positive page becomes 1,
/// and a negative start index is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
    start_index: Option<u64>,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u64 = 10;

    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let positive = |value: Option<i64>| value.and_then(|v| u64::try_from(v).ok()).filter(|v| *v >= 1);

        Self {
            page: positive(page).unwrap_or(1),
            per_page: positive(per_page).unwrap_or(Self::DEFAULT_PER_PAGE),
            start_index: None,
        }
    }

    /// Override the computed offset with an explicit start index.
    pub fn with_start_index(mut self, start_index: Option<i64>) -> Self {
        self.start_index = start_index.and_then(|v| u64::try_from(v).ok());
        self
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.start_index
            .unwrap_or_else(|| (self.page - 1).saturating_mul(self.per_page))
    }

    /// Maximum number of records to return.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of users plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub total_count: u64,
    pub items: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_person_name_bounds() {
        assert_eq!(PersonName::new("  Ada ".to_string()).unwrap().as_str(), "Ada");
        assert_eq!(
            PersonName::new("A".to_string()),
            Err(NameError::TooShort { min: 2, actual: 1 })
        );
        assert_eq!(
            PersonName::new("x".repeat(101)),
            Err(NameError::TooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_phone_validation() {
        assert_eq!(PhoneNumber::new("555-0001".to_string()).unwrap().as_str(), "555-0001");
        assert!(PhoneNumber::new("+1 (555) 010.0001".to_string()).is_ok());
        assert_eq!(PhoneNumber::new("   ".to_string()), Err(PhoneError::Empty));
        assert_eq!(
            PhoneNumber::new("555-CALL".to_string()),
            Err(PhoneError::InvalidCharacters)
        );
    }

    #[test]
    fn test_role_parsing_is_exact() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("USER".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(RoleError::Unknown("admin".to_string()))
        );
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn test_role_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_password_policy_and_redaction() {
        let password = Password::new("hunter22".to_string());
        assert_eq!(format!("{:?}", password), "Password(***)");
        assert_eq!(password.validated().unwrap().expose(), "hunter22");

        assert_eq!(
            Password::new("short".to_string()).validated().unwrap_err(),
            PasswordPolicyError::TooShort { min: 6, actual: 5 }
        );
    }

    #[test]
    fn test_user_ids_are_time_ordered() {
        let first = UserId::new();
        let second = UserId::new();
        assert!(first.0 < second.0);
        assert_eq!(UserId::from_string(&first.to_string()), Ok(first));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);

        let page = PageRequest::new(Some(0), Some(-5));
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(Some(2), Some(10)).offset(), 10);
        assert_eq!(PageRequest::new(Some(3), Some(7)).offset(), 14);
    }

    #[test]
    fn test_start_index_overrides_page() {
        let page = PageRequest::new(Some(3), Some(10)).with_start_index(Some(4));
        assert_eq!(page.offset(), 4);
        assert_eq!(page.limit(), 10);

        let page = PageRequest::new(Some(3), Some(10)).with_start_index(Some(-1));
        assert_eq!(page.offset(), 20);
    }
}
