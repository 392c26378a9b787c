use crate::application::rooms::join::JoinRoomRequest;
use crate::presentation::handlers::rooms::{MemberResource, RoomResource};
use crate::shared::error::{ErrorResponse, JsonApiError, JsonApiErrorSource};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roomie API",
        version = "0.1.0",
        description = "Room membership service. Members authenticate with the authorization code they receive when joining a room.\n\nResponses follow the JSON:API v1.1 document structure."
    ),
    paths(
        crate::presentation::handlers::rooms::get_room,
        crate::presentation::handlers::rooms::join_room,
        crate::presentation::handlers::rooms::delete_member,
    ),
    components(
        schemas(
            JoinRoomRequest,

            RoomResource,
            MemberResource,
            JsonApiResource<RoomResource>,
            JsonApiResource<MemberResource>,
            JsonApiResponse<JsonApiResource<RoomResource>>,
            JsonApiResponse<JsonApiResource<MemberResource>>,

            ErrorResponse,
            JsonApiError,
            JsonApiErrorSource,
        )
    ),
    tags(
        (name = "rooms", description = "Room membership endpoints")
    )
)]
pub struct ApiDoc;
