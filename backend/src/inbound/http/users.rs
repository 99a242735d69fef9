//! User directory HTTP handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users
//! PUT    /api/v1/users
//! GET    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! GET    /api/v1/users/{id}/friends
//! GET    /api/v1/users/{id}/friends/common/{other_id}
//! PUT    /api/v1/users/{id}/friends/{friend_id}
//! DELETE /api/v1/users/{id}/friends/{friend_id}
//! ```
//!
//! Like films, `PUT /users` carries the target id in the request body.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{Friendship, User, UserDraft};
use crate::domain::Error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for creating or replacing a user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Target user id; required for `PUT /users`, ignored on create.
    pub id: Option<i64>,
    pub email: String,
    pub login: String,
    /// Display name; falls back to the login when absent or blank.
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Friendship edge in user responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipResponse {
    pub friend_id: i64,
    pub status: String,
}

impl From<Friendship> for FriendshipResponse {
    fn from(value: Friendship) -> Self {
        Self {
            friend_id: value.friend_id,
            status: value.status.to_string(),
        }
    }
}

/// Response payload for a user with friendship edges.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    pub friends: Vec<FriendshipResponse>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            login: value.login,
            name: value.name,
            birthday: value.birthday,
            friends: value.friends.into_iter().map(Into::into).collect(),
        }
    }
}

fn draft_from_payload(payload: UserPayload) -> UserDraft {
    UserDraft {
        email: payload.email,
        login: payload.login,
        name: payload.name,
        birthday: payload.birthday,
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.get_user(path.into_inner()).await?;
    Ok(web::Json(user.into()))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .create_user(draft_from_payload(payload.into_inner()))
        .await?;
    Ok(web::Json(user.into()))
}

/// Replace a user; the target id travels in the body.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users")]
pub async fn update_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    let id = payload
        .id
        .ok_or_else(|| Error::not_found("user id must be provided"))?;
    let user = state
        .users
        .update_user(id, draft_from_payload(payload))
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Users this user has befriended.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/friends",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Friends of the user", body = [UserResponse]),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listFriends"
)]
#[get("/users/{id}/friends")]
pub async fn list_friends(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let friends = state.users.friends_of(path.into_inner()).await?;
    Ok(web::Json(friends.into_iter().map(Into::into).collect()))
}

/// Users befriended by (or befriending) both sides.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/friends/common/{other_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("other_id" = i64, Path, description = "Other user id")
    ),
    responses(
        (status = 200, description = "Mutual friends", body = [UserResponse]),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "commonFriends"
)]
#[get("/users/{id}/friends/common/{other_id}")]
pub async fn common_friends(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let (id, other_id) = path.into_inner();
    let shared = state.users.common_friends(id, other_id).await?;
    Ok(web::Json(shared.into_iter().map(Into::into).collect()))
}

/// Add a friendship edge and return the befriended user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/friends/{friend_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("friend_id" = i64, Path, description = "Befriended user id")
    ),
    responses(
        (status = 200, description = "The befriended user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Edge already exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addFriend"
)]
#[put("/users/{id}/friends/{friend_id}")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<UserResponse>> {
    let (id, friend_id) = path.into_inner();
    let friend = state.users.add_friend(id, friend_id).await?;
    Ok(web::Json(friend.into()))
}

/// Remove a friendship edge.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/friends/{friend_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("friend_id" = i64, Path, description = "Befriended user id")
    ),
    responses(
        (status = 204, description = "Edge removed (or was already absent)"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "removeFriend"
)]
#[delete("/users/{id}/friends/{friend_id}")]
pub async fn remove_friend(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (id, friend_id) = path.into_inner();
    state.users.remove_friend(id, friend_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::user::FriendshipStatus;
    use rstest::rstest;

    #[rstest]
    fn payload_parses_with_optional_fields_absent() {
        let parsed: UserPayload = serde_json::from_value(serde_json::json!({
            "email": "ada@example.com",
            "login": "ada",
            "birthday": "1990-06-01"
        }))
        .expect("parses");
        assert!(parsed.id.is_none());
        assert!(parsed.name.is_none());
    }

    #[rstest]
    fn response_spells_out_friendship_status() {
        let user = User {
            id: 1,
            email: "ada@example.com".into(),
            login: "ada".into(),
            name: "Ada".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 6, 1).expect("valid date"),
            friends: vec![Friendship {
                friend_id: 2,
                status: FriendshipStatus::Unconfirmed,
            }],
        };

        let json = serde_json::to_value(UserResponse::from(user)).expect("serialises");
        assert_eq!(json["friends"][0]["friendId"], 2);
        assert_eq!(json["friends"][0]["status"], "unconfirmed");
    }
}
