use async_trait::async_trait;
use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::InsertedUser;
use crate::domain::user::models::NewUserCommand;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Hashes the password, assigns id and timestamps, issues the initial token
    /// pair and inserts the record.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicatePhone` - Phone number is already registered
    /// * `Timeout` - Write deadline exceeded
    /// * `Store` - Persistence failed
    async fn signup(&self, command: NewUserCommand) -> Result<InsertedUser, UserError>;

    /// Verify credentials, rotate the stored tokens and return the updated user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token signing failed
    /// * `Timeout` - Deadline exceeded
    async fn login(&self, credentials: Credentials) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve one page of users together with the total user count.
    async fn list_users(&self, page: PageRequest) -> Result<UserPage, UserError>;

    /// Persist a newly issued token pair on the user and bump `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn refresh_stored_tokens(&self, id: &UserId, tokens: &TokenPair)
        -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations own the uniqueness of email and phone: `insert` must decide
/// conflicts atomically with the write.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered (reported first when both collide)
    /// * `DuplicatePhone` - Phone number is already registered
    /// * `Store` - Database operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve `limit` users in creation order starting at `offset`, plus the total count.
    async fn list_page(&self, offset: u64, limit: u64) -> Result<UserPage, UserError>;

    /// Overwrite the stored token pair and `updated_at` of an existing user.
    ///
    /// Update only, never an upsert: a record without credentials and contact
    /// fields must not come into being here, so an unknown id is an error.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn store_tokens(
        &self,
        id: &UserId,
        access_token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserError>;
}
