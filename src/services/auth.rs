use anyhow::{Result, anyhow};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;

use crate::database::models::{AdminUser, ChangePasswordInput, LoginInput, LoginResponse};
use crate::database::repositories::AdminUserRepository;
use crate::error::AppError;
use crate::services::session::SessionGate;

#[derive(Clone)]
pub struct AuthService {
    admin_repository: AdminUserRepository,
    session_gate: SessionGate,
}

impl AuthService {
    pub fn new(admin_repository: AdminUserRepository, session_gate: SessionGate) -> Self {
        Self {
            admin_repository,
            session_gate,
        }
    }

    pub async fn login(&self, request: LoginInput) -> Result<LoginResponse, AppError> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }

        let user = self
            .admin_repository
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify(&request.password, &user.password_hash).map_err(anyhow::Error::from)? {
            log::warn!("Failed login attempt for admin {}", username);
            return Err(AppError::Unauthorized);
        }

        let (token, session) = self.session_gate.issue(&user.username, Utc::now())?;
        let expires_at = session.expires_at(self.session_gate.ttl());
        log::info!("Admin {} logged in", user.username);

        Ok(LoginResponse {
            token,
            session,
            expires_at,
        })
    }

    pub async fn change_password(
        &self,
        username: &str,
        request: ChangePasswordInput,
    ) -> Result<(), AppError> {
        request.validate().map_err(AppError::BadRequest)?;

        let user = self
            .admin_repository
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify(&request.current_password, &user.password_hash).map_err(anyhow::Error::from)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash(&request.new_password, DEFAULT_COST).map_err(anyhow::Error::from)?;
        self.admin_repository
            .update_password(user.id, &password_hash)
            .await?;
        log::info!("Admin {} changed their password", username);

        Ok(())
    }

    /// Creates the configured admin account when it does not exist yet.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<Option<AdminUser>> {
        if self.admin_repository.find_by_username(username).await?.is_some() {
            return Ok(None);
        }
        if password.chars().count() < crate::database::models::MIN_PASSWORD_LENGTH {
            return Err(anyhow!("Bootstrap admin password is too short"));
        }

        let password_hash = hash(password, DEFAULT_COST)?;
        let user = self.admin_repository.create(username, &password_hash).await?;
        log::info!("Created admin account {}", user.username);

        Ok(Some(user))
    }
}
