use crate::api::models::{ActionRequest, RequestError, ResponseBody, ResponseEnvelope, TransportMode};
use crate::core::errors::UserServiceError;
use crate::core::models::user::User;
use crate::core::services::UserService;
use crate::infrastructure::storage::UserStore;
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::BTreeMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";
const INTERNAL_ERROR_BODY: &str = r#"{"success":false,"error":"Internal server error"}"#;

/// Turns action-tagged events into `UserService` calls and every outcome,
/// errors included, into a `ResponseEnvelope`. Nothing is re-raised past here.
pub struct RequestDispatcher<S: UserStore> {
    service: UserService<S>,
    mode: TransportMode,
}

impl<S: UserStore> RequestDispatcher<S> {
    pub fn new(service: UserService<S>, mode: TransportMode) -> Self {
        RequestDispatcher { service, mode }
    }

    pub fn service(&self) -> &UserService<S> {
        &self.service
    }

    pub async fn dispatch(&self, event: Value) -> ResponseEnvelope {
        debug!("Event received: {}", event);

        let request = match self.mode {
            TransportMode::Wrapped => {
                if is_preflight(&event) {
                    return self.envelope(200, String::new());
                }
                match unwrap_body(event) {
                    Ok(request) => request,
                    Err(err) => return self.reject(err),
                }
            }
            TransportMode::Bare => event,
        };

        let action = match ActionRequest::from_value(&request) {
            Ok(action) => action,
            Err(err) => return self.reject(err),
        };

        match self.execute(action).await {
            Ok(user) => match ResponseBody::success(user.as_ref()) {
                Ok(body) => self.respond(200, &body),
                Err(err) => {
                    error!("Failed to encode response data: {}", err);
                    self.respond(500, &ResponseBody::failure(err.to_string()))
                }
            },
            // Anything raised past the action check is a 500, whatever its kind.
            Err(err) => {
                match &err {
                    UserServiceError::Store(_) => error!("Request failed: {}", err),
                    _ => warn!("Request failed: {}", err),
                }
                self.respond(500, &ResponseBody::failure(err.to_string()))
            }
        }
    }

    /// Entry point for a plain HTTP request carrying the event as its body.
    pub async fn dispatch_http(&self, method: &str, body: &str) -> ResponseEnvelope {
        match self.mode {
            TransportMode::Wrapped => {
                self.dispatch(serde_json::json!({ "httpMethod": method, "body": body }))
                    .await
            }
            TransportMode::Bare => match serde_json::from_str(body) {
                Ok(event) => self.dispatch(event).await,
                Err(err) => self.reject(RequestError::Invalid(err.to_string())),
            },
        }
    }

    pub async fn execute(&self, action: ActionRequest) -> Result<Option<User>, UserServiceError> {
        match action {
            ActionRequest::AddUser(input) => self.service.create_user(input).await.map(Some),
            ActionRequest::GetUser(input) => match (input.user_id, input.email) {
                (Some(id), _) => self.service.get_user_by_id(&id).await,
                (None, Some(email)) => self.service.get_user_by_email(&email).await,
                (None, None) => self.service.get_user_by_id("").await,
            },
        }
    }

    fn reject(&self, err: RequestError) -> ResponseEnvelope {
        warn!("Request rejected: {}", err);
        self.respond(400, &ResponseBody::failure(err.to_string()))
    }

    fn respond(&self, status: u16, body: &ResponseBody) -> ResponseEnvelope {
        match serde_json::to_string(body) {
            Ok(body) => self.envelope(status, body),
            Err(err) => {
                error!("Failed to encode response body: {}", err);
                self.envelope(500, INTERNAL_ERROR_BODY.to_string())
            }
        }
    }

    fn envelope(&self, status_code: u16, body: String) -> ResponseEnvelope {
        ResponseEnvelope {
            status_code,
            headers: response_headers(self.mode),
            body,
        }
    }
}

pub fn response_headers(mode: TransportMode) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
    if mode == TransportMode::Wrapped {
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "POST, GET, OPTIONS".to_string(),
        );
        headers.insert("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string());
    }
    headers
}

fn is_preflight(event: &Value) -> bool {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .is_some_and(|method| method.eq_ignore_ascii_case("OPTIONS"))
}

/// A transport envelope carries the request in `body`, either as a JSON
/// string or inline. Without a usable body the event is the request.
fn unwrap_body(event: Value) -> Result<Value, RequestError> {
    match event.get("body") {
        Some(Value::String(raw)) if !raw.is_empty() => {
            serde_json::from_str(raw).map_err(|e| RequestError::Invalid(e.to_string()))
        }
        Some(body @ Value::Object(_)) => Ok(body.clone()),
        _ => Ok(event),
    }
}
