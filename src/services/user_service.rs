//! 用户服务：注册、登录与用户管理

use crate::{
    auth::{jwt::TokenCodec, password::CredentialHasher},
    error::AppError,
    models::{auth::*, user::*},
    repository::UserRepository,
};
use std::sync::Arc;

const USER_NOT_FOUND: &str = "user not found";

pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<TokenCodec>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            token_codec,
        }
    }

    /// 用户注册
    pub async fn register(&self, req: UserRequest) -> Result<UserResponse, AppError> {
        let user = self.insert_user(req).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// 创建用户（管理入口，语义与注册一致）
    pub async fn create_user(&self, req: UserRequest) -> Result<UserResponse, AppError> {
        let user = self.insert_user(req).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// 用户登录
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.token_codec.issue(user.id, &user.email)?;

        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    /// 获取当前用户资料
    pub async fn get_profile(&self, user_id: UserId) -> Result<UserResponse, AppError> {
        self.get_user(user_id).await
    }

    /// 根据 ID 获取用户
    pub async fn get_user(&self, user_id: UserId) -> Result<UserResponse, AppError> {
        let user = self.find_live(user_id).await?;
        Ok(UserResponse::from(user))
    }

    /// 更新用户
    pub async fn update_user(
        &self,
        user_id: UserId,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let req = req.normalized();
        let mut user = self.find_live(user_id).await?;

        if let Some(email) = req.email {
            if email != user.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(AppError::Conflict(EMAIL_TAKEN_ON_UPDATE.to_string()));
                }
                user.email = email;
            }
        }

        if let Some(name) = req.name {
            user.name = name;
        }

        if let Some(password) = req.password {
            user.password_hash = self.hasher.hash(&password)?;
        }

        let updated = self
            .users
            .update(&user)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        tracing::info!(user_id, "User updated");

        Ok(UserResponse::from(updated))
    }

    /// 删除用户（软删除）
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), AppError> {
        self.find_live(user_id).await?;

        if !self.users.delete(user_id).await? {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        tracing::info!(user_id, "User deleted");
        Ok(())
    }

    /// 分页列出用户
    pub async fn list_users(&self, page: Pagination) -> Result<Vec<UserResponse>, AppError> {
        let users = self.users.list(page.limit, page.offset).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn insert_user(&self, req: UserRequest) -> Result<UserResponse, AppError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN_ON_CREATE.to_string()));
        }

        let new_user = NewUser {
            name: req.name,
            email: req.email,
            password_hash: self.hasher.hash(&req.password)?,
        };

        let user = self.users.create(&new_user).await?;
        Ok(UserResponse::from(user))
    }

    async fn find_live(&self, user_id: UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }
}
