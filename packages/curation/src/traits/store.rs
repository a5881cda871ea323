//! Storage traits for corpus artifacts and subscribers.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::article::Corpus;
use crate::types::subscriber::{Subscriber, SubscriberProfile};

/// Storage for the classified corpus artifact.
///
/// The pipeline writes the corpus after classification and again after
/// duplicate resolution; digest generation reads it back. Implementations
/// decide where it lives (a JSON file on disk, memory in tests).
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Load the stored corpus, or `None` if nothing has been stored yet.
    async fn load(&self) -> Result<Option<Corpus>>;

    /// Store the corpus, replacing any previous one.
    async fn store(&self, corpus: &Corpus) -> Result<()>;
}

/// Storage for subscribers.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Look up a subscriber by canonical id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Subscriber>>;

    /// Look up a subscriber by email address.
    ///
    /// Implementations derive the canonical id from the email, so
    /// callers never compute ids themselves.
    async fn get_by_email(&self, email: &str) -> Result<Option<Subscriber>>;

    /// Create or update a subscriber from profile fields.
    ///
    /// Updates touch only the profile columns; a stored digest survives
    /// re-subscribing. Returns the subscriber's canonical id.
    async fn upsert(&self, profile: &SubscriberProfile) -> Result<String>;

    /// Attach a generated digest to a subscriber.
    async fn set_digest(&self, id: &str, content: &str) -> Result<()>;
}
