//! Subscriber types and id derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derive the canonical subscriber id for an email address.
///
/// Ids are `"user_"` plus the first eight hex characters of the MD5 of the
/// lowercased email, so the same address always maps to the same id no
/// matter how it was capitalized at signup.
pub fn subscriber_id(email: &str) -> String {
    let digest = md5::compute(email.to_lowercase().as_bytes());
    let hex = format!("{:x}", digest);
    format!("user_{}", &hex[..8])
}

/// A stored subscriber, including any generated digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Canonical id derived from the email (see [`subscriber_id`])
    pub id: String,

    /// Email address as originally provided
    pub email: String,

    /// Given name, used to address the digest
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Free-text interest description fed to the relevance filter
    pub preferences: String,

    /// Most recently generated digest document, if any
    pub digest_content: Option<String>,

    /// When the digest was generated
    pub digest_generated_at: Option<DateTime<Utc>>,
}

/// Profile fields a subscriber controls.
///
/// Upserting a profile never touches the digest columns; those are owned
/// by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub preferences: String,
}

impl SubscriberProfile {
    /// Create a new profile.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        preferences: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            preferences: preferences.into(),
        }
    }

    /// The canonical id this profile maps to.
    pub fn subscriber_id(&self) -> String {
        subscriber_id(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_id_shape() {
        let id = subscriber_id("ada@example.com");
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), "user_".len() + 8);
        assert!(id["user_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_subscriber_id_case_insensitive() {
        assert_eq!(
            subscriber_id("Ada@Example.COM"),
            subscriber_id("ada@example.com")
        );
    }

    #[test]
    fn test_distinct_emails_distinct_ids() {
        assert_ne!(
            subscriber_id("ada@example.com"),
            subscriber_id("grace@example.com")
        );
    }

    #[test]
    fn test_profile_id_matches_free_function() {
        let profile = SubscriberProfile::new("ada@example.com", "Ada", "Lovelace", "chips");
        assert_eq!(profile.subscriber_id(), subscriber_id("ada@example.com"));
    }
}
