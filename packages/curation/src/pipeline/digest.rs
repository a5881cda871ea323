//! Digest stage - two-call personalization for one subscriber.

use tracing::{debug, info};

use crate::error::Result;
use crate::pipeline::prompts::{
    relevance_payload, synthesis_prompt, RELEVANCE_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
use crate::traits::inference::Inference;
use crate::types::article::Corpus;
use crate::types::subscriber::Subscriber;

/// Escape characters that downstream renderers treat as markup.
///
/// Dollar signs open math spans in some renderers and underscores open
/// emphasis, so both get a leading backslash.
pub fn escape_markup(text: &str) -> String {
    text.replace('$', "\\$").replace('_', "\\_")
}

/// Write a personalized digest for one subscriber.
///
/// Stage A filters the corpus down to the stories matching the
/// subscriber's preferences. Its reply is handed to stage B verbatim as
/// source material, never parsed, so the filter is free to annotate or
/// editorialize. Stage B writes the digest document. Either call
/// failing fails the digest; there is no partial output.
pub async fn synthesize_digest<N>(
    subscriber: &Subscriber,
    corpus: &Corpus,
    inference: &N,
) -> Result<String>
where
    N: Inference + ?Sized,
{
    info!(
        subscriber = %subscriber.id,
        articles = corpus.len(),
        "Generating digest"
    );

    let articles_json = serde_json::to_string(&corpus.articles)?;
    let source_material = inference
        .complete(
            RELEVANCE_SYSTEM_PROMPT,
            &relevance_payload(&subscriber.preferences, &articles_json),
        )
        .await?;

    debug!(
        chars = source_material.len(),
        "Relevance filter returned source material"
    );

    let document = inference
        .complete(
            SYNTHESIS_SYSTEM_PROMPT,
            &synthesis_prompt(&subscriber.first_name, &source_material),
        )
        .await?;

    Ok(escape_markup(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInference;
    use crate::types::article::ClassifiedArticle;
    use crate::types::subscriber::subscriber_id;

    fn subscriber() -> Subscriber {
        Subscriber {
            id: subscriber_id("ada@example.com"),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            preferences: "semiconductors and AI".to_string(),
            digest_content: None,
            digest_generated_at: None,
        }
    }

    fn corpus() -> Corpus {
        Corpus::new(vec![ClassifiedArticle {
            id: 1,
            headline: "Chipmaker announces new fab".to_string(),
            summary: "A large investment in capacity.".to_string(),
            primary_tag: "Technology".to_string(),
            secondary_tags: vec!["Semiconductors".to_string()],
            source: "Wire".to_string(),
            date: String::new(),
            importance_score: 7,
            link: String::new(),
        }])
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("costs $4B"), "costs \\$4B");
        assert_eq!(escape_markup("snake_case_name"), "snake\\_case\\_name");
        assert_eq!(escape_markup("$a_b$"), "\\$a\\_b\\$");
        assert_eq!(escape_markup("plain text"), "plain text");
    }

    #[tokio::test]
    async fn test_stage_b_receives_stage_a_verbatim() {
        let mock = MockInference::new()
            .with_reply("FILTERED: only the fab story [annotated]")
            .with_reply("**Subject:** Fabs\n\nBody");

        let document = synthesize_digest(&subscriber(), &corpus(), &mock)
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].system, RELEVANCE_SYSTEM_PROMPT);
        assert!(calls[0].user.contains("PREFERENCES: semiconductors and AI"));
        assert!(calls[0].user.contains("Chipmaker announces new fab"));
        assert_eq!(calls[1].system, SYNTHESIS_SYSTEM_PROMPT);
        assert!(calls[1]
            .user
            .contains("FILTERED: only the fab story [annotated]"));
        assert!(calls[1].user.contains("daily briefing for Ada"));
        assert_eq!(document, "**Subject:** Fabs\n\nBody");
    }

    #[tokio::test]
    async fn test_output_is_escaped() {
        let mock = MockInference::new()
            .with_reply("source")
            .with_reply("Stock up $5, ticker ACME_X");

        let document = synthesize_digest(&subscriber(), &corpus(), &mock)
            .await
            .unwrap();

        assert_eq!(document, "Stock up \\$5, ticker ACME\\_X");
    }

    #[tokio::test]
    async fn test_stage_a_failure_stops_digest() {
        let mock = MockInference::new().with_failure("overloaded");

        let result = synthesize_digest(&subscriber(), &corpus(), &mock).await;

        assert!(result.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stage_b_failure_stops_digest() {
        let mock = MockInference::new()
            .with_reply("source")
            .with_failure("overloaded");

        let result = synthesize_digest(&subscriber(), &corpus(), &mock).await;

        assert!(result.is_err());
        assert_eq!(mock.call_count(), 2);
    }
}
