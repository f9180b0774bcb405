#![allow(dead_code)]

pub mod db;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialExtractor;
use auth::RefreshTokenRecord;
use axum::Router;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::session::models::AccessTokenLifetime;
use chirpy::domain::session::service::SessionService;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::router::create_router;
use chirpy::session::errors::SessionError;
use chirpy::session::ports::RefreshTokenRepository;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::models::UserId;
use chirpy::user::ports::UserRepository;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

/// Router wired to fresh in-memory storage.
pub fn build_router(
    strict_authorization_scheme: bool,
) -> (Router, Arc<InMemoryRefreshTokenRepository>) {
    let credentials = if strict_authorization_scheme {
        CredentialExtractor::strict()
    } else {
        CredentialExtractor::lenient()
    };
    let authenticator =
        Arc::new(Authenticator::new(JWT_SECRET).with_credential_extractor(credentials));

    let user_repository = Arc::new(InMemoryUserRepository::default());
    let chirp_repository = Arc::new(InMemoryChirpRepository::default());
    let refresh_token_repository = Arc::new(InMemoryRefreshTokenRepository::default());

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let chirp_service = Arc::new(ChirpService::new(chirp_repository));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        Arc::clone(&refresh_token_repository),
        Arc::clone(&authenticator),
        AccessTokenLifetime::default(),
        Duration::days(60),
    ));

    let router = create_router(
        user_service,
        chirp_service,
        session_service,
        authenticator,
        POLKA_API_KEY,
    );

    (router, refresh_token_repository)
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    pub async fn spawn_with(strict_authorization_scheme: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let (router, refresh_tokens) = build_router(strict_authorization_scheme);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            refresh_tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and return the response data.
    pub async fn create_user(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the response data.
    pub async fn login(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id, user.clone());
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
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryChirpRepository {
    chirps: Mutex<Vec<Chirp>>,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn list(&self, author_id: Option<UserId>) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect();
        chirps.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(chirps)
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != *id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn get(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.records.lock().unwrap().get(token).cloned()
    }

    /// Move a record's expiry, to exercise expired tokens.
    pub fn set_expires_at(&self, token: &str, expires_at: DateTime<Utc>) {
        if let Some(record) = self.records.lock().unwrap().get_mut(token) {
            record.expires_at = expires_at;
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), SessionError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.token.clone(), record);
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, SessionError> {
        Ok(self.get(token))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), SessionError> {
        if let Some(record) = self.records.lock().unwrap().get_mut(token) {
            record.revoke(at);
        }
        Ok(())
    }
}
