//! Configuration for the curation pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the batch classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// How many raw items go into one inference call
    pub batch_size: usize,

    /// Hard cap on items accepted per run; `None` means unlimited
    pub max_items: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_items: Some(1000),
        }
    }
}

impl ClassifierConfig {
    /// Create a config with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the per-run item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Remove the per-run item cap.
    pub fn unlimited(mut self) -> Self {
        self.max_items = None;
        self
    }
}

/// Configuration for a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Classifier limits
    pub classifier: ClassifierConfig,

    /// Pause between pipeline stages
    pub settle_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            settle_delay: Duration::from_secs(1),
        }
    }
}

impl PipelineConfig {
    /// Create a config with the default stage pacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier config.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the pause between stages.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.max_items, Some(1000));
    }

    #[test]
    fn test_classifier_builders() {
        let config = ClassifierConfig::new().with_batch_size(5).unlimited();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.max_items, None);
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.settle_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_pipeline_builders() {
        let config = PipelineConfig::new()
            .with_classifier(ClassifierConfig::new().with_max_items(10))
            .with_settle_delay(Duration::ZERO);
        assert_eq!(config.classifier.max_items, Some(10));
        assert!(config.settle_delay.is_zero());
    }
}
