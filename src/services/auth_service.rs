//! Authentication service.
//!
//! Public registration and login for parents and tutors, a separate login
//! path for back-office accounts, and JWT issuance/verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, Role, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub is_superuser: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Registration data after handler-level validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
    pub country_id: Option<Uuid>,
}

/// Authentication use cases.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a parent or tutor account
    async fn register(&self, data: Registration) -> AppResult<User>;

    /// Public login; back-office accounts are rejected here
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Back-office login; only staff accounts pass
    async fn admin_login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        is_superuser: user.is_superuser,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using the Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    /// Shared credential check with a timing-safe fallback hash so missing
    /// usernames cost the same as wrong passwords.
    async fn check_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let user_result = self.uow.users().find_by_username(username).await?;

        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let hash = user_result
            .as_ref()
            .map(|user| user.password_hash.as_str())
            .unwrap_or(dummy_hash);

        let password_valid = Password::from_hash(hash.to_string()).verify(password);

        match user_result {
            Some(user) if password_valid => {
                if !user.is_active {
                    return Err(AppError::forbidden("This account has been deactivated"));
                }
                Ok(user)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, data: Registration) -> AppResult<User> {
        // Admin accounts are created from the back-office only
        if !data.role.is_public() {
            return Err(AppError::validation(
                "Choose either the parent or the tutor role",
            ));
        }

        if self
            .uow
            .users()
            .find_by_username(&data.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&data.password)?.into_string();
        let now = Utc::now();

        self.uow
            .users()
            .create(User {
                id: Uuid::new_v4(),
                username: data.username,
                email: data.email,
                password_hash,
                first_name: String::new(),
                last_name: String::new(),
                phone: data.phone,
                role: data.role,
                country_id: data.country_id,
                is_superuser: false,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.check_credentials(&username, &password).await?;

        // Staff accounts must go through the back-office login
        if user.is_staff() {
            return Err(AppError::forbidden(
                "Administrator accounts cannot use the public login",
            ));
        }

        generate_token(&user, &self.config)
    }

    async fn admin_login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.check_credentials(&username, &password).await?;

        if !user.is_staff() {
            return Err(AppError::forbidden("Access denied"));
        }

        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
