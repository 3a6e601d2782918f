use crate::{
    api::{
        dispatcher::RequestDispatcher,
        models::{ResponseBody, ResponseEnvelope},
        openapi::ApiDoc,
    },
    infrastructure::storage::in_memory::InMemoryUserStore,
};
use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

pub type AppState = Arc<RequestDispatcher<InMemoryUserStore>>;

pub fn api_routes(dispatcher: AppState) -> Router {
    Router::new()
        .route("/", any(handle_http))
        .route("/invoke", post(invoke))
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(dispatcher)
}

#[utoipa::path(
    post,
    path = "/",
    request_body(content = String, description = "Action-tagged request JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Action dispatched", body = ResponseBody),
        (status = 400, description = "Missing or unknown action, or invalid input", body = ResponseBody),
        (status = 500, description = "Store failure", body = ResponseBody)
    )
)]
async fn handle_http(State(dispatcher): State<AppState>, method: Method, body: String) -> Response {
    let envelope = dispatcher.dispatch_http(method.as_str(), &body).await;
    into_http_response(envelope)
}

#[utoipa::path(
    post,
    path = "/invoke",
    request_body(content = String, description = "Raw event, bare or transport-wrapped", content_type = "application/json"),
    responses(
        (status = 200, description = "Response envelope produced by the dispatcher", body = ResponseEnvelope)
    )
)]
async fn invoke(State(dispatcher): State<AppState>, Json(event): Json<Value>) -> Json<ResponseEnvelope> {
    Json(dispatcher.dispatch(event).await)
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Replays a response envelope as a real HTTP response.
pub fn into_http_response(envelope: ResponseEnvelope) -> Response {
    let status = StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, envelope.body).into_response();
    let headers = response.headers_mut();
    for (name, value) in envelope.headers {
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            headers.insert(name, value);
        }
    }
    response
}
