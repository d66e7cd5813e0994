use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordSecret;
use auth::Role;
use auth::SigningConfig;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::Profile;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::user::errors::UserError;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "user-service";
pub const TEST_AUDIENCE: &str = "user-service-clients";

/// Repository keeping users and profiles in memory, with the same uniqueness rules as Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryUserRepository {
    /// Change the stored role, as an operator would directly in the database.
    pub fn set_role(&self, id: &UserId, role: Role) {
        if let Some(user) = self.users.lock().unwrap().get_mut(id) {
            user.role = role;
        }
    }

    pub fn stored_secret(&self, id: &UserId) -> Option<PasswordSecret> {
        self.users
            .lock()
            .unwrap()
            .get(id)
            .map(|user| user.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User, profile: Profile) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.id, user.clone());
        self.profiles.lock().unwrap().insert(profile.user_id, profile);

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, UserError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn update_profile(&self, profile: Profile) -> Result<Profile, UserError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.get_mut(&profile.user_id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(profile)
            }
            None => Err(UserError::ProfileNotFound(profile.user_id.to_string())),
        }
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordSecret,
    ) -> Result<(), UserError> {
        match self.users.lock().unwrap().get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.clone();
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

/// Router wired to an in-memory repository, driven in-process with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub signing_config: Arc<SigningConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        let signing_config = Arc::new(
            SigningConfig::with_default_lifetime(TEST_SECRET, TEST_ISSUER, TEST_AUDIENCE)
                .expect("Failed to build signing config"),
        );
        let authenticator = Arc::new(Authenticator::new(Arc::clone(&signing_config)));
        let repository = Arc::new(InMemoryUserRepository::default());

        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        Self {
            router: create_router(user_service, authenticator),
            repository,
            signing_config,
        }
    }

    /// Send a request and return the status with the parsed JSON body (`Null` if not JSON).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, None, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(token), Some(body)).await
    }

    /// Register an account and return its id.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> UserId {
        let (status, body) = self
            .post(
                "/api/auth/register",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        UserId::from_string(body["data"]["id"].as_str().expect("id missing"))
            .expect("id is not a UUID")
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }
}
