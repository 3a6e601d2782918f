mod config_tests;

use crate::api::dispatcher::RequestDispatcher;
use crate::api::models::TransportMode;
use crate::core::errors::StoreError;
use crate::core::models::user::User;
use crate::core::services::UserService;
use crate::infrastructure::storage::in_memory::InMemoryUserStore;
use crate::infrastructure::storage::{StoreConfig, UserStore};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn test_store_config() -> StoreConfig {
    StoreConfig {
        table_name: "UserTable-test".to_string(),
        region: "eu-west-1".to_string(),
    }
}

pub fn create_test_service() -> UserService<RecordingStore> {
    UserService::new(RecordingStore::new())
}

pub fn create_test_dispatcher(mode: TransportMode) -> RequestDispatcher<RecordingStore> {
    RequestDispatcher::new(create_test_service(), mode)
}

pub fn is_generated_id(id: &str) -> bool {
    let mut parts = id.splitn(3, '_');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    prefix == "user"
        && !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == 8
        && suffix.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Wraps the in-memory table, counting calls and injecting backend faults.
pub struct RecordingStore {
    inner: InMemoryUserStore,
    gets_by_id: AtomicUsize,
    gets_by_email: AtomicUsize,
    puts: AtomicUsize,
    email_keys: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    collide_writes: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore {
            inner: InMemoryUserStore::new(test_store_config()),
            gets_by_id: AtomicUsize::new(0),
            gets_by_email: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
            email_keys: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            collide_writes: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> usize {
        self.gets_by_id.load(Ordering::SeqCst)
            + self.gets_by_email.load(Ordering::SeqCst)
            + self.puts.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn email_keys(&self) -> Vec<String> {
        self.email_keys.lock().unwrap().clone()
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn collide_writes(&self) {
        self.collide_writes.store(true, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &InMemoryUserStore {
        &self.inner
    }
}

#[async_trait]
impl UserStore for RecordingStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.gets_by_id.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("DynamoDB error".to_string()));
        }
        self.inner.get_by_id(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.gets_by_email.fetch_add(1, Ordering::SeqCst);
        self.email_keys.lock().unwrap().push(email.to_string());
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("DynamoDB error".to_string()));
        }
        self.inner.get_by_email(email).await
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("DynamoDB error".to_string()));
        }
        if self.collide_writes.load(Ordering::SeqCst) {
            return Err(StoreError::AlreadyExists(user.id.clone()));
        }
        self.inner.put_if_absent(user).await
    }
}
