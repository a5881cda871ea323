//! Article types - raw feed items and the classified corpus.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A raw item as delivered by an upstream feed, before classification.
///
/// Feeds are inconsistent about which fields they populate, so everything
/// except the source and headline defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    /// Outlet or feed the item came from
    pub source: String,

    /// Upstream category label, if the feed provides one
    #[serde(default)]
    pub category: String,

    /// Headline as published (may be clickbait; the classifier rewrites it)
    pub headline: String,

    /// Publication date string, format varies by feed
    #[serde(default)]
    pub date: String,

    /// Short summary or description
    #[serde(default)]
    pub summary: String,

    /// Link to the full article
    #[serde(default)]
    pub link: String,
}

impl RawItem {
    /// Create a new raw item.
    pub fn new(source: impl Into<String>, headline: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            category: String::new(),
            headline: headline.into(),
            date: String::new(),
            summary: String::new(),
            link: String::new(),
        }
    }

    /// Set the upstream category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the publication date string.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the article link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

/// Wire shape of a raw feed artifact: `{"articles": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub articles: Vec<RawItem>,
}

/// An article that survived classification.
///
/// Ids are assigned by the pipeline as a dense `1..=N` sequence over the
/// merged corpus. They are stable for the lifetime of one artifact and are
/// what the duplicate resolver refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedArticle {
    /// Dense pipeline-assigned id, starting at 1
    pub id: u32,

    /// Cleaned, factual headline
    pub headline: String,

    /// One-sentence objective summary
    pub summary: String,

    /// Exactly one tag from the primary taxonomy
    pub primary_tag: String,

    /// Up to two tags from the secondary taxonomy
    #[serde(default)]
    pub secondary_tags: Vec<String>,

    /// Outlet the story came from
    pub source: String,

    /// Publication date as reported upstream
    #[serde(default)]
    pub date: String,

    /// Global-impact score, 1 to 10
    pub importance_score: i32,

    /// Link to the full article
    #[serde(default)]
    pub link: String,
}

/// The classified corpus artifact: `{"articles": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub articles: Vec<ClassifiedArticle>,
}

impl Corpus {
    /// Create a corpus from a list of articles.
    pub fn new(articles: Vec<ClassifiedArticle>) -> Self {
        Self { articles }
    }

    /// Number of articles in the corpus.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the corpus holds no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// All article ids, in corpus order.
    pub fn ids(&self) -> Vec<u32> {
        self.articles.iter().map(|a| a.id).collect()
    }

    /// A copy of the corpus with the given ids removed, order preserved.
    pub fn without_ids(&self, ids: &HashSet<u32>) -> Corpus {
        Corpus {
            articles: self
                .articles
                .iter()
                .filter(|a| !ids.contains(&a.id))
                .cloned()
                .collect(),
        }
    }
}
