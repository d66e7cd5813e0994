use std::str::FromStr;

use async_trait::async_trait;
use auth::PasswordSecret;
use auth::Role;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::Address;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

const PROFILE_COLUMNS: &str =
    "user_id, address_street, address_city, address_postal_code, address_country, phone_number, date_of_birth, bio";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: PasswordSecret::from(row.password_hash),
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ProfileRow {
    user_id: Uuid,
    address_street: String,
    address_city: String,
    address_postal_code: String,
    address_country: String,
    phone_number: String,
    date_of_birth: Option<NaiveDate>,
    bio: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: UserId(row.user_id),
            address: Address {
                street: row.address_street,
                city: row.address_city,
                postal_code: row.address_postal_code,
                country: row.address_country,
            },
            phone_number: row.phone_number,
            date_of_birth: row.date_of_birth,
            bio: row.bio,
        }
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User, profile: Profile) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, address_street, address_city, address_postal_code,
                                  address_country, phone_number, date_of_birth, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.user_id.0)
        .bind(&profile.address.street)
        .bind(&profile.address.city)
        .bind(&profile.address.postal_code)
        .bind(&profile.address.country)
        .bind(&profile.phone_number)
        .bind(profile.date_of_birth)
        .bind(&profile.bio)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, UserError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Profile::from))
    }

    async fn update_profile(&self, profile: Profile) -> Result<Profile, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET address_street = $2, address_city = $3, address_postal_code = $4,
                address_country = $5, phone_number = $6, date_of_birth = $7, bio = $8
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.0)
        .bind(&profile.address.street)
        .bind(&profile.address.city)
        .bind(&profile.address.postal_code)
        .bind(&profile.address.country)
        .bind(&profile.phone_number)
        .bind(profile.date_of_birth)
        .bind(&profile.bio)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::ProfileNotFound(profile.user_id.to_string()));
        }

        Ok(profile)
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordSecret,
    ) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
