use utoipa::OpenApi;

use crate::{
    api::models::{GetUserInput, ResponseBody, ResponseEnvelope},
    core::models::user::{CreateUserInput, User},
};

#[derive(OpenApi)]
#[openapi(
    paths(super::handlers::handle_http, super::handlers::invoke),
    components(schemas(User, CreateUserInput, GetUserInput, ResponseBody, ResponseEnvelope)),
    info(
        title = "User Management API",
        description = "Create users and look them up by id or email through action-tagged requests",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
