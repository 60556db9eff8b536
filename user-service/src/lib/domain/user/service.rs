use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::session::claims::Identity;
use crate::domain::session::tokens::TokenService;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::InsertedUser;
use crate::domain::user::models::NewUserCommand;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Upper bounds for service operations.
///
/// Lookups and password verification run under `read`; signup (hashing
/// included), listings and token writes under `write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub read: Duration,
    pub write: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(10),
            write: Duration::from_secs(100),
        }
    }
}

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    tokens: Arc<TokenService>,
    deadlines: Deadlines,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    /// * `tokens` - Session token issuer sharing the same authenticator
    ///
    /// # Returns
    /// Configured user service instance with default deadlines
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            tokens,
            deadlines: Deadlines::default(),
        }
    }

    pub fn with_deadlines(mut self, deadlines: Deadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, stored_hash: String) -> Result<bool, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))
    }

    async fn register(&self, command: NewUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let now = Utc::now();
        let mut user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            phone: command.phone,
            role: command.role,
            token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        let pair = self.tokens.issue(&Identity::from(&user)).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign tokens during signup");
            UserError::from(e)
        })?;
        user.token = Some(pair.access_token);
        user.refresh_token = Some(pair.refresh_token);

        self.repository.insert(user).await
    }
}

/// Run an operation, failing with `Timeout` once `limit` elapses.
async fn within<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, UserError>
where
    F: Future<Output = Result<T, UserError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Operation exceeded its deadline"
            );
            Err(UserError::Timeout(operation.to_string()))
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: NewUserCommand) -> Result<InsertedUser, UserError> {
        let created = within(self.deadlines.write, "signup", self.register(command)).await?;
        tracing::info!(user_id = %created.id, "User registered");

        Ok(InsertedUser {
            inserted_id: created.id,
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<User, UserError> {
        let user = match self.get_user_by_email(&credentials.email).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => return Err(UserError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let matches = within(
            self.deadlines.read,
            "login",
            self.verify_password(
                credentials.password.expose().to_string(),
                user.password_hash.clone(),
            ),
        )
        .await?;
        if !matches {
            return Err(UserError::InvalidCredentials);
        }

        let pair = self.tokens.issue(&Identity::from(&user)).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Failed to sign tokens during login");
            UserError::from(e)
        })?;
        self.refresh_stored_tokens(&user.id, &pair).await?;

        self.get_user(&user.id).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        within(self.deadlines.read, "get_user", self.repository.find_by_id(id))
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        within(
            self.deadlines.read,
            "get_user_by_email",
            self.repository.find_by_email(email),
        )
        .await?
        .ok_or(UserError::NotFound(email.to_string()))
    }

    async fn list_users(&self, page: PageRequest) -> Result<UserPage, UserError> {
        within(
            self.deadlines.write,
            "list_users",
            self.repository.list_page(page.offset(), page.limit()),
        )
        .await
    }

    async fn refresh_stored_tokens(
        &self,
        id: &UserId,
        tokens: &TokenPair,
    ) -> Result<(), UserError> {
        within(
            self.deadlines.write,
            "refresh_stored_tokens",
            self.repository.store_tokens(
                id,
                &tokens.access_token,
                &tokens.refresh_token,
                Utc::now(),
            ),
        )
        .await
    }
}
