use super::claims::SessionClaims;
use super::errors::AccessError;
use super::tokens::TokenService;
use crate::user::models::Role;

const FORBIDDEN: &str = "unauthorized to access this resource";

/// Identity bound to one authenticated request.
///
/// Built once by [`authenticate`] and handed to handlers, which consult it
/// for role and ownership decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<SessionClaims> for AuthContext {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.uid,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            role: claims.role,
        }
    }
}

impl AuthContext {
    /// Succeeds only when the bound role is exactly `role`.
    ///
    /// There is no hierarchy: ADMIN does not satisfy a USER requirement.
    pub fn require_role(&self, role: Role) -> Result<(), AccessError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AccessError::Forbidden(FORBIDDEN.to_string()))
        }
    }

    /// Succeeds when the caller owns the resource or holds `role`.
    pub fn require_owner_or_role(&self, owner_id: &str, role: Role) -> Result<(), AccessError> {
        if self.user_id == owner_id {
            return Ok(());
        }
        self.require_role(role)
    }
}

/// Authenticate a raw token value taken from the request.
///
/// # Errors
/// * `Unauthenticated` - No token, or the token failed validation
pub fn authenticate(tokens: &TokenService, token: Option<&str>) -> Result<AuthContext, AccessError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AccessError::Unauthenticated("Token was not found".to_string()))?;

    tokens
        .validate(token)
        .map(AuthContext::from)
        .map_err(|e| AccessError::Unauthenticated(e.to_string()))
}
