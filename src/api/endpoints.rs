// Typed wrappers over the backend routes consumed by the pages
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{Achievement, AdminStats, Dashboard, Group, MemberStats, NewGoal, User};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub nome: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub nome: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportTicket {
    pub assunto: String,
    pub mensagem: String,
}

/// Route builders, kept in one place so pages and tests agree on paths
pub mod paths {
    pub const LOGIN: &str = "/collaborators/token";
    pub const LEGACY_LOGIN: &str = "/token";
    pub const REGISTER: &str = "/register";
    pub const USERS_ME: &str = "/users/me";
    pub const USERS_ME_PASSWORD: &str = "/users/me/password";
    pub const VERIFY_PASSWORD: &str = "/users/verify-password";
    pub const ADMIN_STATS: &str = "/api/admin/dashboard/stats";
    pub const ADMIN_USERS: &str = "/api/admin/users/";
    pub const SUPPORT_TICKETS: &str = "/api/support/tickets";
    pub const FORGOT_PASSWORD: &str = "/api/forgot-password";
    pub const VERIFY_CODE: &str = "/api/verify-code";
    pub const RESET_PASSWORD: &str = "/api/reset-password";

    pub fn dashboard(group_id: &str) -> String {
        format!("/groups/{}/dashboard", group_id)
    }

    pub fn goals(group_id: &str) -> String {
        format!("/groups/{}/goals", group_id)
    }

    pub fn achievements(group_id: &str) -> String {
        format!("/groups/{}/achievements", group_id)
    }

    pub fn group(group_id: &str) -> String {
        format!("/api/groups/{}/dashboard", group_id)
    }

    pub fn invites(group_id: &str) -> String {
        format!("/api/groups/{}/invites", group_id)
    }

    pub fn member(group_id: &str, member_id: &str) -> String {
        format!("/api/groups/{}/members/{}", group_id, member_id)
    }

    pub fn stats(group_id: &str, year: i32, month: u32) -> String {
        format!("/api/groups/{}/stats?year={}&month={}", group_id, year, month)
    }

    pub fn admin_user(user_id: &str) -> String {
        format!("/api/admin/users/{}", user_id)
    }

    pub fn grant_premium(user_id: &str) -> String {
        format!("/api/admin/users/{}/grant-premium", user_id)
    }
}

impl ApiClient {
    // Authentication

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        let body = json!({ "email": email, "password": password });
        let value = self.request_public(Method::POST, paths::LOGIN, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn login_legacy(&self, username: &str, password: &str) -> ClientResult<TokenResponse> {
        let value = self
            .post_form_public(paths::LEGACY_LOGIN, &[("username", username), ("password", password)])
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn register(&self, account: &NewAccount) -> ClientResult<Value> {
        let body = serde_json::to_value(account)?;
        self.request_public(Method::POST, paths::REGISTER, Some(&body)).await
    }

    // Account

    pub async fn users_me(&self) -> ClientResult<User> {
        self.get(paths::USERS_ME).await
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> ClientResult<Value> {
        self.send_json(Method::PUT, paths::USERS_ME, update).await
    }

    pub async fn delete_me(&self) -> ClientResult<Value> {
        self.delete(paths::USERS_ME).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> ClientResult<Value> {
        self.send_json(Method::PUT, paths::USERS_ME_PASSWORD, change).await
    }

    pub async fn verify_password(&self, password: &str) -> ClientResult<Value> {
        self.send_json(Method::POST, paths::VERIFY_PASSWORD, &json!({ "password": password }))
            .await
    }

    // Group finance

    pub async fn dashboard(&self, group_id: &str) -> ClientResult<Dashboard> {
        self.get(&paths::dashboard(group_id)).await
    }

    pub async fn create_goal(&self, group_id: &str, goal: &NewGoal) -> ClientResult<Value> {
        self.send_json(Method::POST, &paths::goals(group_id), goal).await
    }

    pub async fn achievements(&self, group_id: &str) -> ClientResult<Vec<Achievement>> {
        self.get(&paths::achievements(group_id)).await
    }

    pub async fn group(&self, group_id: &str) -> ClientResult<Group> {
        self.get(&paths::group(group_id)).await
    }

    pub async fn invite(&self, group_id: &str, email: &str) -> ClientResult<Value> {
        self.send_json(Method::POST, &paths::invites(group_id), &json!({ "email": email }))
            .await
    }

    pub async fn remove_member(&self, group_id: &str, member_id: &str) -> ClientResult<Value> {
        self.delete(&paths::member(group_id, member_id)).await
    }

    pub async fn member_stats(
        &self,
        group_id: &str,
        year: i32,
        month: u32,
    ) -> ClientResult<Vec<MemberStats>> {
        self.get(&paths::stats(group_id, year, month)).await
    }

    // Administration

    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        self.get(paths::ADMIN_STATS).await
    }

    pub async fn admin_users(&self) -> ClientResult<Vec<User>> {
        self.get(paths::ADMIN_USERS).await
    }

    pub async fn admin_user(&self, user_id: &str) -> ClientResult<User> {
        self.get(&paths::admin_user(user_id)).await
    }

    pub async fn grant_premium(&self, user_id: &str) -> ClientResult<Value> {
        self.request(Method::POST, &paths::grant_premium(user_id), None).await
    }

    // Support and recovery

    pub async fn create_ticket(&self, ticket: &SupportTicket) -> ClientResult<Value> {
        self.send_json(Method::POST, paths::SUPPORT_TICKETS, ticket).await
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<Value> {
        let body = json!({ "email": email });
        self.request_public(Method::POST, paths::FORGOT_PASSWORD, Some(&body)).await
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> ClientResult<Value> {
        let body = json!({ "email": email, "code": code });
        self.request_public(Method::POST, paths::VERIFY_CODE, Some(&body)).await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> ClientResult<Value> {
        let body = json!({ "email": email, "code": code, "new_password": new_password });
        self.request_public(Method::POST, paths::RESET_PASSWORD, Some(&body)).await
    }
}
