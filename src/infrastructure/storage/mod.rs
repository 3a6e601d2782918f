use crate::core::errors::StoreError;
use crate::core::models::user::User;
use async_trait::async_trait;

/// Key-value port for user records. A record is addressable by `id` and by
/// its normalized `email`; writes are conditional on `id` only.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Inserts `user` unless a record already exists for `user.id`.
    async fn put_if_absent(&self, user: &User) -> Result<(), StoreError>;
}

/// Where the backing table lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_name: String,
    pub region: String,
}

impl StoreConfig {
    pub const DEFAULT_TABLE_NAME: &'static str = "UserTable";
    pub const DEFAULT_REGION: &'static str = "eu-west-1";
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            table_name: Self::DEFAULT_TABLE_NAME.to_string(),
            region: Self::DEFAULT_REGION.to_string(),
        }
    }
}

pub mod in_memory;
