use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// A stored user record. Field names follow the wire format (`createdAt`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Always serialized, `null` when the user gave no phone number.
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(with = "iso_millis")]
    #[schema(value_type = String, example = "2024-01-01T00:00:00.000Z")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    #[schema(value_type = String, example = "2024-01-01T00:00:00.000Z")]
    pub updated_at: DateTime<Utc>,
}

/// Payload of an `add_user` request. Every field is optional on the wire so
/// that missing values surface as validation errors rather than parse errors.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CreateUserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix, which
/// sort lexicographically in creation order.
pub mod iso_millis {
    use super::*;

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
