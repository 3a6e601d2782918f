use crate::core::errors::{
    EMAIL_EXISTS, INVALID_EMAIL, MISSING_FIELDS, MISSING_USER_ID, StoreError, UserServiceError,
};
use crate::core::models::user::{CreateUserInput, User};
use crate::infrastructure::storage::UserStore;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub const USER_ID_PREFIX: &str = "user";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validates input, enforces email uniqueness and assigns identifiers.
///
/// The uniqueness check and the insert are two separate store round trips:
/// two concurrent creations with the same email can both pass the check.
/// The conditional put only guards against `id` collisions.
pub struct UserService<S: UserStore> {
    storage: S,
}

impl<S: UserStore> UserService<S> {
    pub fn new(storage: S) -> Self {
        UserService { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn create_user(&self, input: CreateUserInput) -> Result<User, UserServiceError> {
        let name = non_blank(input.name.as_deref()).ok_or_else(|| {
            warn!("create_user rejected: missing name");
            UserServiceError::validation(MISSING_FIELDS)
        })?;
        let email = non_blank(input.email.as_deref()).ok_or_else(|| {
            warn!("create_user rejected: missing email");
            UserServiceError::validation(MISSING_FIELDS)
        })?;
        if !is_valid_email(email) {
            warn!("create_user rejected: invalid email {:?}", email);
            return Err(UserServiceError::validation(INVALID_EMAIL));
        }
        let email = normalize_email(email);

        if self.get_user_by_email(&email).await?.is_some() {
            warn!("create_user rejected: email {} already registered", email);
            return Err(UserServiceError::Conflict(EMAIL_EXISTS.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: generate_user_id(now),
            name: name.to_string(),
            email,
            phone: non_blank(input.phone.as_deref()).map(String::from),
            created_at: now,
            updated_at: now,
        };

        match self.storage.put_if_absent(&user).await {
            Ok(()) => {
                info!("Created user {} <{}>", user.id, user.email);
                Ok(user)
            }
            Err(err @ StoreError::AlreadyExists(_)) => {
                warn!("Generated id {} collided with an existing record", user.id);
                Err(err.into())
            }
            Err(err) => {
                error!("Failed to persist user {}: {}", user.id, err);
                Err(err.into())
            }
        }
    }

    /// A missing record is `Ok(None)`, not an error.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, UserServiceError> {
        if id.trim().is_empty() {
            return Err(UserServiceError::validation(MISSING_USER_ID));
        }
        debug!("Looking up user by id {}", id);
        self.storage.get_by_id(id).await.map_err(|err| {
            error!("Lookup of user {} failed: {}", id, err);
            UserServiceError::from(err)
        })
    }

    /// An empty email short-circuits to `Ok(None)` without touching the store.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        if email.trim().is_empty() {
            return Ok(None);
        }
        let email = normalize_email(email);
        debug!("Looking up user by email {}", email);
        self.storage.get_by_email(&email).await.map_err(|err| {
            error!("Lookup of email {} failed: {}", email, err);
            UserServiceError::from(err)
        })
    }
}

/// `user_<unix millis>_<8 hex chars>`; the suffix carries 4 random bytes.
pub fn generate_user_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4();
    let suffix: String = random.as_bytes()[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}_{}_{}", USER_ID_PREFIX, now.timestamp_millis(), suffix)
}

/// Two non-empty parts around a single `@`, with a `.` inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
