use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Datastore;
use crate::error::{AppError, Result};
use crate::models::{ContactMessage, GuestbookEntry, RsvpRecord};

const RSVPS_KEY: &str = "rsvps";
const GUESTBOOK_KEY: &str = "guestbook";
const CONTACT_KEY: &str = "contact_messages";

/// Redis-backed document store. Each collection is a list of JSON documents.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn append<T: Serialize>(&self, key: &str, doc: &T) -> Result<()> {
        let mut conn = self.pool.get().await?;
        let json = serde_json::to_string(doc)?;

        conn.rpush::<_, _, ()>(key, &json).await?;
        Ok(())
    }

    async fn range<T: DeserializeOwned>(&self, key: &str, start: isize, stop: isize) -> Result<Vec<T>> {
        let mut conn = self.pool.get().await?;

        let raw: Vec<String> = conn.lrange(key, start, stop).await?;

        // A single bad document must not hide the rest of the collection.
        let docs = raw
            .into_iter()
            .filter_map(|json| match serde_json::from_str(&json) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping malformed document");
                    None
                }
            })
            .collect();

        Ok(docs)
    }
}

#[async_trait]
impl Datastore for RedisStore {
    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<()> {
        self.append(RSVPS_KEY, record).await?;
        tracing::info!(rsvp_id = %record.id, "RSVP stored");
        Ok(())
    }

    async fn list_rsvps(&self) -> Result<Vec<RsvpRecord>> {
        self.range(RSVPS_KEY, 0, -1).await
    }

    async fn insert_guestbook_entry(&self, entry: &GuestbookEntry) -> Result<()> {
        self.append(GUESTBOOK_KEY, entry).await?;
        tracing::debug!(entry_id = %entry.id, "Guestbook entry stored");
        Ok(())
    }

    async fn list_guestbook_entries(&self, limit: usize) -> Result<Vec<GuestbookEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut entries: Vec<GuestbookEntry> =
            self.range(GUESTBOOK_KEY, -(limit as isize), -1).await?;
        entries.reverse();
        Ok(entries)
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<()> {
        self.append(CONTACT_KEY, message).await?;
        tracing::debug!(message_id = %message.id, "Contact message stored");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.pool.get().await?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| AppError::Datastore(e.to_string()))?;

        Ok(pong == "PONG")
    }
}
