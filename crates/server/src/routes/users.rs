//! CRUD for dashboard accounts. Responses carry [`UserInfo`]; the stored
//! password hash never leaves the db crate.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::user::{CreateUser, UpdateUser, User, UserInfo};
use utils::{password::hash_password, response::ApiResponse};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<UserInfo>>>, ApiError> {
    let users = User::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(
        users.into_iter().map(UserInfo::from).collect(),
    )))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, ApiError> {
    let user = User::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(ResponseJson(ApiResponse::success(user.into())))
}

pub async fn create_user(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateUser>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, ApiError> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if User::find_by_email(&state.db().pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("email already in use".to_string()));
    }

    let password_hash = hash_password(&payload.password);
    let user = User::create(&state.db().pool, &payload, &password_hash, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(user.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateUser>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, ApiError> {
    User::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    if let Some(password) = payload.password.as_deref() {
        if password.len() < 8 {
            return Err(ApiError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }
    }
    let password_hash = payload.password.as_deref().map(hash_password);

    let user = User::update(&state.db().pool, id, &payload, password_hash.as_deref()).await?;
    Ok(ResponseJson(ApiResponse::success(user.into())))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = User::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("user"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/users",
        Router::new()
            .route("/", get(list_users).post(create_user))
            .route("/{id}", get(get_user).put(update_user).delete(delete_user)),
    )
}
