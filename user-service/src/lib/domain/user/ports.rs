use async_trait::async_trait;
use auth::PasswordSecret;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account with role `User` and an empty profile.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored secret is corrupt
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve a user together with their profile.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No profile row for this user
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<(User, Profile), UserError>;

    /// Replace the editable profile fields.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No profile row for this user
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, UserError>;

    /// Change the password after verifying the current one.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidCredentials` - Old password does not match
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user together with their initial profile.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User, profile: Profile) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve the profile owned by a user.
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, UserError>;

    /// Overwrite an existing profile.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No profile row for this user
    async fn update_profile(&self, profile: Profile) -> Result<Profile, UserError>;

    /// Replace the stored password secret.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordSecret,
    ) -> Result<(), UserError>;
}
