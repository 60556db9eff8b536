use thiserror::Error;

/// Rejections produced by the request guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Token missing, malformed, tampered with or expired.
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid identity without the required role or ownership.
    #[error("{0}")]
    Forbidden(String),
}
