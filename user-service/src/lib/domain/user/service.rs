use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordError;
use auth::PasswordSecret;
use auth::Role;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Password derivation runs on the blocking pool so it never stalls the runtime.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn with_authenticator<T, F>(&self, f: F) -> Result<T, UserError>
    where
        T: Send + 'static,
        F: FnOnce(&Authenticator) -> T + Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || f(&authenticator))
            .await
            .map_err(|e| UserError::Unknown(format!("Credential task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password = command.password;
        let password_hash = self
            .with_authenticator(move |authenticator| authenticator.hash_password(password.as_str()))
            .await??;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };
        let profile = Profile::empty(user.id);

        let created_user = self.repository.create(user, profile).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email = %command.email, "Login for unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        let password = command.password;
        let stored_secret = user.password_hash.clone();
        let identity = user.identity();
        let result = self
            .with_authenticator(move |authenticator| {
                authenticator.authenticate(&password, stored_secret.as_str(), &identity)
            })
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored password secret is corrupt");
                    UserError::Password(err)
                }
                AuthenticationError::JwtError(err) => UserError::Token(err),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_profile(&self, id: &UserId) -> Result<(User, Profile), UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::ProfileNotFound(id.to_string()))?;

        let profile = self
            .repository
            .find_profile(id)
            .await?
            .ok_or(UserError::ProfileNotFound(id.to_string()))?;

        Ok((user, profile))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, UserError> {
        let mut profile = self
            .repository
            .find_profile(id)
            .await?
            .ok_or(UserError::ProfileNotFound(id.to_string()))?;

        profile.address = command.address;
        profile.phone_number = command.phone_number.as_str().to_string();
        profile.date_of_birth = Some(command.date_of_birth);
        profile.bio = command.bio;

        let updated = self.repository.update_profile(profile).await?;

        tracing::info!(user_id = %id, "Profile updated");

        Ok(updated)
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let old_password = command.old_password;
        let new_password = command.new_password;
        let stored_secret = user.password_hash;
        let new_secret = self
            .with_authenticator(
                move |authenticator| -> Result<Option<PasswordSecret>, PasswordError> {
                    if !authenticator.verify_password(&old_password, stored_secret.as_str())? {
                        return Ok(None);
                    }
                    authenticator.hash_password(new_password.as_str()).map(Some)
                },
            )
            .await??
            .ok_or(UserError::InvalidCredentials)?;

        self.repository.update_password_hash(id, &new_secret).await?;

        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }
}
