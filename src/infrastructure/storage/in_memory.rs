use crate::core::errors::StoreError;
use crate::core::models::user::User;
use crate::infrastructure::storage::{StoreConfig, UserStore};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process key-value table with two access paths onto the same record.
#[derive(Clone)]
pub struct InMemoryUserStore {
    config: StoreConfig,
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new(config: StoreConfig) -> Self {
        InMemoryUserStore {
            config,
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    pub fn region(&self) -> &str {
        &self.config.region
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        debug!("{}: get id={}", self.config.table_name, id);
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        debug!("{}: get email={}", self.config.table_name, email);
        Ok(self.users_by_email.read().await.get(email).cloned())
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), StoreError> {
        // Lock order: users, then users_by_email.
        let mut users = self.users.write().await;
        match users.entry(user.id.clone()) {
            Entry::Occupied(_) => return Err(StoreError::AlreadyExists(user.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
            }
        }
        // The email path is last-writer-wins, like an unconditional index update.
        self.users_by_email
            .write()
            .await
            .insert(user.email.clone(), user.clone());
        debug!("{}: put id={}", self.config.table_name, user.id);
        Ok(())
    }
}
