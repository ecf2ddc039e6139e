pub mod redis_store;

pub use redis_store::RedisStore;

use async_trait::async_trait;
use deadpool_redis::{Config as RedisConfig, Pool, Runtime};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ContactMessage, GuestbookEntry, RsvpRecord};

/// Document store for everything the site collects.
///
/// Append and read only: records are never updated or deleted.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<()>;

    /// All RSVPs, oldest first
    async fn list_rsvps(&self) -> Result<Vec<RsvpRecord>>;

    async fn insert_guestbook_entry(&self, entry: &GuestbookEntry) -> Result<()>;

    /// Most recent entries first
    async fn list_guestbook_entries(&self, limit: usize) -> Result<Vec<GuestbookEntry>>;

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<()>;

    async fn health_check(&self) -> Result<bool>;
}

/// Create a Redis connection pool
pub fn create_pool(config: &Config) -> Result<Pool> {
    let redis_config = RedisConfig::from_url(&config.redis_url);
    let pool = redis_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| AppError::Datastore(format!("Failed to create Redis pool: {}", e)))?;

    Ok(pool)
}
