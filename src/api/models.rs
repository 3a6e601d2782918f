use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::models::user::{CreateUserInput, User};

pub const ACTION_ADD_USER: &str = "add_user";
pub const ACTION_GET_USER: &str = "get_user";

/// Whether events arrive inside an HTTP-style transport envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    /// `{httpMethod, body}` envelopes, CORS headers, OPTIONS preflight.
    #[default]
    Wrapped,
    /// The event is the request itself.
    Bare,
}

impl TransportMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wrapped" | "http" => Some(TransportMode::Wrapped),
            "bare" | "direct" => Some(TransportMode::Bare),
            _ => None,
        }
    }
}

/// Rejections raised before any service call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("action is required")]
    MissingAction,
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("invalid request: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct GetUserInput {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A request after the action tag has been checked and its payload typed.
#[derive(Clone, Debug)]
pub enum ActionRequest {
    AddUser(CreateUserInput),
    GetUser(GetUserInput),
}

impl ActionRequest {
    pub fn from_value(request: &Value) -> Result<Self, RequestError> {
        let action = match request.get("action") {
            None | Some(Value::Null) => return Err(RequestError::MissingAction),
            Some(Value::String(s)) if s.is_empty() => return Err(RequestError::MissingAction),
            Some(Value::Bool(false)) => return Err(RequestError::MissingAction),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return Err(RequestError::MissingAction),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(RequestError::UnknownAction(other.to_string())),
        };

        match action {
            ACTION_ADD_USER => {
                let input = match request.get("data") {
                    None | Some(Value::Null) => CreateUserInput::default(),
                    Some(data) => CreateUserInput::deserialize(data).map_err(invalid)?,
                };
                Ok(ActionRequest::AddUser(input))
            }
            ACTION_GET_USER => GetUserInput::deserialize(request)
                .map(ActionRequest::GetUser)
                .map_err(invalid),
            other => Err(RequestError::UnknownAction(other.to_string())),
        }
    }
}

fn invalid(err: serde_json::Error) -> RequestError {
    RequestError::Invalid(err.to_string())
}

/// JSON carried in the response envelope's `body`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseBody {
    pub success: bool,
    /// Present on success; `null` when a lookup found nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseBody {
    pub fn success(user: Option<&User>) -> Result<Self, serde_json::Error> {
        let data = match user {
            Some(user) => serde_json::to_value(user)?,
            None => Value::Null,
        };
        Ok(ResponseBody {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ResponseBody {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// What the dispatcher hands back to the invoking runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// Serialized `ResponseBody`, or empty for a preflight.
    pub body: String,
}

impl ResponseEnvelope {
    pub fn parsed_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
