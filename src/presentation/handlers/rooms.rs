use crate::application::rooms::delete_user::{DeleteUserCommand, DeleteUserUseCase};
use crate::application::rooms::get::GetRoomUseCase;
use crate::application::rooms::join::{JoinRoomRequest, JoinRoomUseCase};
use crate::domain::rooms::{Room, RoomMember};
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResource {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
    /// Only present for the viewer itself, or for every member when the viewer is an admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String)]
    pub joined_at: time::OffsetDateTime,
}

impl MemberResource {
    fn new(member: &RoomMember, reveal_code: bool) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            is_admin: member.is_admin,
            auth_code: reveal_code.then(|| member.auth_code.clone()),
            joined_at: member.joined_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResource {
    pub name: String,
    pub room_code: String,
    pub members: Vec<MemberResource>,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl RoomResource {
    /// Room as seen by the member holding `viewer_code`
    pub fn for_viewer(room: &Room, viewer_code: &str) -> Self {
        let viewer_is_admin = room
            .find_member(viewer_code)
            .is_some_and(|m| m.is_admin);

        Self {
            name: room.name().to_string(),
            room_code: room.room_code().to_string(),
            members: room
                .members()
                .iter()
                .map(|m| MemberResource::new(m, viewer_is_admin || m.auth_code == viewer_code))
                .collect(),
            created_at: room.created_at(),
            updated_at: room.updated_at(),
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RoomQuery {
    /// Authorization code of the requesting member
    pub user_code: String,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteMemberQuery {
    /// Authorization code of the admin performing the deletion
    pub admin_code: String,
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(q)| q)
        .map_err(|e| AppError::Malformed(e.body_text()))
}

/// Get the room the requesting member belongs to
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(RoomQuery),
    responses(
        (status = 200, description = "Room found", body = JsonApiResponse<JsonApiResource<RoomResource>>),
        (status = 400, description = "Missing user code", body = ErrorResponse),
        (status = 404, description = "No room for this code", body = ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    params: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let params = query_params(params)?;
    let use_case = GetRoomUseCase::new(state.rooms.clone());

    let room = use_case.execute(&params.user_code).await?;
    let resource = JsonApiResource::new(
        "rooms",
        room.id().to_string(),
        RoomResource::for_viewer(&room, &params.user_code),
    );

    Ok((StatusCode::OK, Json(JsonApiResponse::new(resource))))
}

/// Join a room by its join code
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{roomCode}/members",
    params(
        ("roomCode" = String, Path, description = "Join code of the room")
    ),
    request_body = JoinRoomRequest,
    responses(
        (status = 201, description = "Joined the room", body = JsonApiResponse<JsonApiResource<MemberResource>>),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn join_room(
    State(state): State<AppState>,
    Path(room_code): Path<String>,
    ValidatedJson(req): ValidatedJson<JoinRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = JoinRoomUseCase::new(state.rooms.clone());

    let member = use_case.execute(&room_code, req).await?;
    let resource = JsonApiResource::new(
        "members",
        member.id.to_string(),
        MemberResource::new(&member, true),
    );

    Ok((StatusCode::CREATED, Json(JsonApiResponse::new(resource))))
}

/// Remove a member from the admin's room
#[utoipa::path(
    delete,
    path = "/api/v1/members/{targetUserCode}",
    params(
        ("targetUserCode" = String, Path, description = "Authorization code of the member to remove"),
        DeleteMemberQuery
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Requester is not an admin", body = ErrorResponse),
        (status = 404, description = "Room, admin or member not found", body = ErrorResponse),
        (status = 500, description = "Room could not be saved", body = ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(target_user_code): Path<String>,
    params: Result<Query<DeleteMemberQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let params = query_params(params)?;
    let use_case = DeleteUserUseCase::new(state.rooms.clone());

    use_case
        .execute(DeleteUserCommand::new(target_user_code, params.admin_code))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
