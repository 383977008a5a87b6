//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users endpoint plus the health probes. The
//! document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::users_dto::{MessageDto, UserDto, UserPageDto, UserPayload};

/// OpenAPI document for the directory REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "CRUD, search, pagination and CSV export over directory users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::export_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserDto,
        UserPageDto,
        UserPayload,
        MessageDto,
        Error,
        ErrorCode,
        ProbeStatus
    )),
    tags(
        (name = "users", description = "Directory user operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
