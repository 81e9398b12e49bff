//! Auth endpoints: register and login.
//!
//! Credentials travel as plain text by design; hardening this surface is
//! explicitly out of scope for the service. The stored password is never
//! echoed back in responses.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::routes::{AppState, ok};
use crate::error::ApiError;
use crate::persistence;

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
}

/// Users keyed by lowercase username.
pub type UserStore = Arc<RwLock<HashMap<String, StoredUser>>>;

/// Constant-time comparison for the password check.
#[inline]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("username is required".to_string()))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Validation("password is required".to_string()))?;
    let key = username.to_lowercase();

    let user = {
        let mut users = state.users.write().await;
        if users.contains_key(&key) {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }
        let user = StoredUser {
            user_id: Uuid::new_v4(),
            username: key.clone(),
            password,
        };
        users.insert(key, user.clone());
        user
    };
    if let Some(pool) = &state.db {
        persistence::insert_user(pool, user.user_id, &user.username, &user.password).await?;
    }
    tracing::info!(user_id = %user.user_id, "user registered");
    Ok((
        StatusCode::CREATED,
        ok(json!({ "userId": user.user_id, "username": user.username })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let username = query
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("username is required".to_string()))?;
    let password = query
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Validation("password is required".to_string()))?;

    let users = state.users.read().await;
    let matched = users
        .get(&username.to_lowercase())
        .filter(|u| constant_time_eq(&u.password, &password));
    match matched {
        Some(user) => Ok(ok(json!({
            "userId": user.user_id,
            "username": user.username,
        }))
        .into_response()),
        None => Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid username or password" })),
        )
            .into_response()),
    }
}
