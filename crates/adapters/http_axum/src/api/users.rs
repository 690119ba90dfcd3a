//! JSON REST handlers for users.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hello_app::ports::UserRepository;
use hello_domain::error::{HelloError, NotFoundError};
use hello_domain::id::UserId;
use hello_domain::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating (or upserting) a user.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<UserId>,
    pub name: String,
    pub email: Option<String>,
}

/// Request body for replacing the user at a given id.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<User>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<User>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<User>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/users`
pub async fn list<UR>(State(state): State<AppState<UR>>) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
{
    let users = state.user_service.get_all().await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /api/users/:id`
pub async fn get<UR>(
    State(state): State<AppState<UR>>,
    Path(id): Path<UserId>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
{
    let user = state.user_service.get_by_id(id).await?.ok_or_else(|| {
        HelloError::from(NotFoundError {
            entity: "User",
            id: id.to_string(),
        })
    })?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `POST /api/users`
pub async fn create<UR>(
    State(state): State<AppState<UR>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
{
    let user = User {
        id: req.id,
        name: req.name,
        email: req.email,
    };
    let saved = state.user_service.save(user).await?;
    Ok(CreateResponse::Created(Json(saved)))
}

/// `PUT /api/users/:id`
pub async fn update<UR>(
    State(state): State<AppState<UR>>,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
{
    let user = User {
        id: Some(id),
        name: req.name,
        email: req.email,
    };
    let saved = state.user_service.save(user).await?;
    Ok(GetResponse::Ok(Json(saved)))
}
