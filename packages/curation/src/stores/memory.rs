//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CurationError, Result};
use crate::traits::ingestor::Ingestor;
use crate::traits::store::{CorpusStore, SubscriberStore};
use crate::types::article::{Corpus, RawItem};
use crate::types::subscriber::{subscriber_id, Subscriber, SubscriberProfile};

/// In-memory backend implementing every storage seam at once.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
pub struct MemoryStore {
    raw_items: RwLock<Option<Vec<RawItem>>>,
    corpus: RwLock<Option<Corpus>>,
    subscribers: RwLock<HashMap<String, Subscriber>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            raw_items: RwLock::new(None),
            corpus: RwLock::new(None),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Stage raw items for the ingest seam.
    pub fn with_raw_items(self, items: Vec<RawItem>) -> Self {
        *self.raw_items.write().unwrap() = Some(items);
        self
    }

    /// Seed a stored corpus.
    pub fn with_corpus(self, corpus: Corpus) -> Self {
        *self.corpus.write().unwrap() = Some(corpus);
        self
    }

    /// Get the number of stored subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap().len()
    }
}

#[async_trait]
impl Ingestor for MemoryStore {
    async fn fetch(&self) -> Result<Vec<RawItem>> {
        self.raw_items
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| CurationError::MissingArtifact {
                artifact: "raw feed".to_string(),
            })
    }
}

#[async_trait]
impl CorpusStore for MemoryStore {
    async fn load(&self) -> Result<Option<Corpus>> {
        Ok(self.corpus.read().unwrap().clone())
    }

    async fn store(&self, corpus: &Corpus) -> Result<()> {
        *self.corpus.write().unwrap() = Some(corpus.clone());
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Subscriber>> {
        Ok(self.subscribers.read().unwrap().get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Subscriber>> {
        self.get_by_id(&subscriber_id(email)).await
    }

    async fn upsert(&self, profile: &SubscriberProfile) -> Result<String> {
        let id = profile.subscriber_id();
        let mut subscribers = self.subscribers.write().unwrap();
        match subscribers.get_mut(&id) {
            Some(existing) => {
                // Profile columns only; a stored digest survives.
                existing.first_name = profile.first_name.clone();
                existing.last_name = profile.last_name.clone();
                existing.preferences = profile.preferences.clone();
            }
            None => {
                subscribers.insert(
                    id.clone(),
                    Subscriber {
                        id: id.clone(),
                        email: profile.email.clone(),
                        first_name: profile.first_name.clone(),
                        last_name: profile.last_name.clone(),
                        preferences: profile.preferences.clone(),
                        digest_content: None,
                        digest_generated_at: None,
                    },
                );
            }
        }
        Ok(id)
    }

    async fn set_digest(&self, id: &str, content: &str) -> Result<()> {
        let mut subscribers = self.subscribers.write().unwrap();
        let subscriber =
            subscribers
                .get_mut(id)
                .ok_or_else(|| CurationError::SubscriberNotFound {
                    id: id.to_string(),
                })?;
        subscriber.digest_content = Some(content.to_string());
        subscriber.digest_generated_at = Some(Utc::now());
        Ok(())
    }
}
