//! Prompts for the curation pipeline.
//!
//! Editorial policy lives here as constants; `{placeholder}` slots are
//! filled by the format functions below. The tag taxonomies interpolate
//! into the classifier prompt so they stay defined in one place.

use crate::taxonomy::{primary_tag_list, secondary_tag_listing};

/// System prompt for the batch classifier.
///
/// Placeholders: `{primary_tags}`, `{secondary_tags}`.
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"You are an advanced news aggregation AI. Your goal is to curate a high-signal news feed by filtering out noise and classifying important stories.

### INSTRUCTIONS

1. **Analyze & Filter**:
   Read the provided news summaries. Select ONLY articles that represent significant developments, such as:
   - Acquisitions, mergers, and major investments.
   - Product launches, recalls, or breakthroughs.
   - Legislative changes, geopolitical shifts, or conflicts.
   - Major controversies or legal actions.

   **DISCARD** articles that are:
   - "Top 10" lists, buying guides, or reviews.
   - Minor incremental updates (e.g., "Game server maintenance").
   - Opinion pieces, editorials, or advice columns.

   **Clean**:
   - Rewrite headlines to be purely factual (remove clickbait like "You won't believe...").
   - Rewrite summaries to be high-signal and objective.

2. **Tag**:
   Assign exactly ONE **Primary Tag** and up to TWO **Secondary Tags** from the lists below. If no secondary tag fits, leave that field empty.

3. **Score**:
   Assign an `importance_score` (1-10) based on global impact.
   - 10 = Historic event / Major Market Crash.
   - 5 = Standard corporate news / Earnings beat.
   - 1 = Minor bug fix / "Top 10" list / Advertisement.

4. **Format Output**:
   You must respond with a valid JSON object containing a list of selected articles.
   Preserve the original `link`, `date`, and `source`.
   Add a simple numerical `id` (1, 2, 3...) to each article.
   Schema:
   {
      "articles": [
         {
            "id": 1,
            "headline": "Article Title",
            "summary": "A one-sentence summary of the event.",
            "primary_tag": "Tag Name",
            "secondary_tags": ["Tag A", "Tag B"],
            "source": "specific news outlet",
            "date": "YYYY-MM-DD HH:mm",
            "importance_score": 5,
            "link": "article link"
         }
      ]
   }

### TAG LISTS

**Primary Tags:**
{primary_tags}

**Secondary Tags:**
{secondary_tags}"#;

/// System prompt for the duplicate resolver.
pub const DEDUP_SYSTEM_PROMPT: &str = r#"You are an expert News Editor. Your goal is to identify REDUNDANT stories in a news feed.

### INSTRUCTIONS
1. **Analyze**: Read the incoming list of news articles.
2. **Find Duplicates**: Look for articles covering the **exact same specific event** (e.g., "Fed raises rates" vs "Federal Reserve hikes interest").
   - If two stories are similar but offer different angles (e.g. "Fed raises rates" vs "Market crashes after Fed decision"), KEEP BOTH.
   - Only mark as duplicate if they convey the exact same core information.
3. **Decide**: For each group of duplicates, pick ONE winner to keep (the one with the best summary or highest importance_score).
4. **Output**: Return a JSON object containing a list of `remove_ids`, the IDs of the articles that should be DELETED.

### OUTPUT SCHEMA
{
  "remove_ids": [12, 45, 99]
}"#;

/// System prompt for the relevance filter (personalization stage A).
pub const RELEVANCE_SYSTEM_PROMPT: &str = "You are a news filter. Select the top 5 articles from the list that strictly match the user's preferences.";

/// System prompt for the digest writer (personalization stage B).
pub const SYNTHESIS_SYSTEM_PROMPT: &str =
    "You are a master newsletter publisher. Write a professional, engaging daily briefing.";

/// Long-form editorial prompt for the digest writer.
///
/// Placeholders: `{first_name}`, `{source_material}`. Carries the full
/// section contract including the conditional Company Watch rule and the
/// literal signoff block.
pub const SYNTHESIS_PROMPT: &str = r#"You are an expert newsletter editor writing a daily briefing for {first_name}.
Your goal is to synthesize the provided source material into a professional, high-signal newsletter.

SOURCE MATERIAL:
{source_material}

### FORMATTING & CONTENT INSTRUCTIONS

**1. Subject Line**
- Must be punchy, relevant, and concise.
- Focus on the main Deep Dive topic.

**2. Executive Summary**
- Provide 3-5 bullet points summarizing the top stories and any major global news mentioned in the other news section.
- Keep them scannable and high-level.

**3. Deep Dives**
- Select the two most significant stories.
- **Formatting**: Do NOT number these stories. Use a **Bold Headline** for each.
- **Content**: For each story, write a cohesive 300-350 word analysis.
- **Structure**: Do NOT use sub-headers (like "Context" or "Why it Matters"). Instead, write 2-3 paragraphs where the first paragraph establishes the context/what happened, and the following paragraphs explain why it matters and the future implications.

**4. Company Watch (Conditional Section)**
- Strict rule: Only create this section if the provided Source Material contains news specifically about companies mentioned in the user's preferences.
- If no news is found for those specific companies, **omit this entire section (including the header)**.
- If found, summarize the updates, specifically looking for stock swings or valuation changes.

**5. Other News**
- Brief summaries (1-2 sentences) of the remaining stories not covered in Deep Dives.
- Also provide brief summaries on any major global news stories not covered in Deep Dives.

**6. Signoff**
- End exactly with this block:

*Daily news curated for you*
From,
The Daily Distill

### STYLE GUIDELINES
- **Tone**: Professional and friendly. Think "smart colleague," not "robot."
- **Negative Constraint**: Do NOT use generic introductions like "Here is your news." Start immediately with the Executive Summary.
- **Visuals**: Use standard Markdown. No colored text or code blocks."#;

/// The literal closing block every digest ends with.
pub const SIGNOFF: &str = "*Daily news curated for you*\nFrom,\nThe Daily Distill";

/// Classifier system prompt with the tag taxonomies filled in.
pub fn classify_system_prompt() -> String {
    CLASSIFY_SYSTEM_PROMPT
        .replace("{primary_tags}", &primary_tag_list())
        .replace("{secondary_tags}", &secondary_tag_listing())
}

/// User payload for one classifier batch.
pub fn classify_user_payload(batch_json: &str) -> String {
    format!("### INPUT DATA\n{}", batch_json)
}

/// User payload for the duplicate resolver.
pub fn dedup_user_payload(articles_json: &str) -> String {
    format!("### ARTICLES LIST\n{}", articles_json)
}

/// User payload for the relevance filter.
pub fn relevance_payload(preferences: &str, articles_json: &str) -> String {
    format!("PREFERENCES: {}\n\nARTICLES: {}", preferences, articles_json)
}

/// Editorial prompt with the subscriber's name and source material filled in.
pub fn synthesis_prompt(first_name: &str, source_material: &str) -> String {
    SYNTHESIS_PROMPT
        .replace("{first_name}", first_name)
        .replace("{source_material}", source_material)
}
