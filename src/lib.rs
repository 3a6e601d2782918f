pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::api::dispatcher::RequestDispatcher;
pub use crate::api::models::TransportMode;
pub use crate::config::Config;
pub use crate::core::errors::{StoreError, UserServiceError};
pub use crate::core::models::user::{CreateUserInput, User};
pub use crate::core::services::UserService;
pub use crate::infrastructure::storage::in_memory::InMemoryUserStore;
pub use crate::infrastructure::storage::{StoreConfig, UserStore};

#[cfg(test)]
mod tests;
