//! Authentication utilities library
//!
//! Provides the credential infrastructure used by the user service:
//! - Password hashing (Argon2id)
//! - JWT token signing and validation with typed failure reasons
//! - An `Authenticator` that owns the signing secret and issues token pairs
//!
//! The service defines its own claim shapes and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims {
//!     sub: Some("user123".to_string()),
//!     ..Claims::expiring_in(1)
//! };
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let access = Claims {
//!     sub: Some("user123".to_string()),
//!     ..Claims::expiring_in(24)
//! };
//! let refresh = Claims::expiring_in(168);
//! let pair = auth.issue_pair(&access, &refresh).unwrap();
//!
//! let decoded: Claims = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
