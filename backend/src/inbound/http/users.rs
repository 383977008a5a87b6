//! Users API handlers.
//!
//! ```text
//! GET    /api/users?page=1&limit=10
//! GET    /api/users/search?query=ada&page=1&limit=10
//! GET    /api/users/export
//! GET    /api/users/{id}
//! POST   /api/users {"name":"Ada","email":"ada@example.com",...}
//! PUT    /api/users/{id} {"role":"User"}
//! DELETE /api/users/{id}
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::debug;

use crate::domain::{Error, USER_DELETED, USER_NOT_FOUND, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{
    ListParams, MessageDto, SearchParams, UserDto, UserPageDto, UserPayload,
};

/// Register the users routes.
///
/// The literal `search` and `export` segments are registered ahead of
/// `{id}` so they are never captured as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use directory_backend::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(search_users)
        .service(export_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}

/// Unparsable ids cannot name a stored user, so they read as missing.
fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|err| {
        debug!(id = raw, error = %err, "rejecting malformed user id");
        Error::not_found(USER_NOT_FOUND)
    })
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListParams),
    responses(
        (status = 200, description = "One page of users", body = UserPageDto),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<UserPageDto>> {
    let page = state.users.list_users(params.page_request()).await?;
    Ok(web::Json(page.into()))
}

/// Search users across every field.
#[utoipa::path(
    get,
    path = "/api/users/search",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching users", body = UserPageDto),
        (status = 400, description = "Missing search query", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<UserPageDto>> {
    let request = params.page_request();
    let SearchParams { query, .. } = params.into_inner();
    let page = state.users.search_users(query, request).await?;
    Ok(web::Json(page.into()))
}

/// Download every user as CSV.
#[utoipa::path(
    get,
    path = "/api/users/export",
    responses(
        (
            status = 200,
            description = "CSV attachment",
            content_type = "text/csv",
            body = String,
            headers(("Content-Disposition" = String, description = "attachment; filename=\"users_export.csv\""))
        ),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "exportUsers"
)]
#[get("/users/export")]
pub async fn export_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let export = state.users.export_users().await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(export.file_name.to_owned())],
    };
    Ok(HttpResponse::Ok()
        .content_type(export.content_type)
        .insert_header(disposition)
        .body(export.bytes))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserDto),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDto>> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failure or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user = state.commands.create_user(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Update some or all fields of a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Validation failure or duplicate email", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserDto>> {
    let id = parse_user_id(&path)?;
    let user = state
        .commands
        .update_user(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageDto>> {
    let id = parse_user_id(&path)?;
    state.commands.delete_user(&id).await?;
    Ok(web::Json(MessageDto {
        message: USER_DELETED.to_owned(),
    }))
}
