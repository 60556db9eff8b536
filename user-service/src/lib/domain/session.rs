//! Session tokens and request authorization.
//!
//! `tokens` issues and validates signed session tokens, `guard` turns a
//! validated token into an [`guard::AuthContext`] and answers role/ownership
//! questions about it.

pub mod claims;
pub mod errors;
pub mod guard;
pub mod tokens;
