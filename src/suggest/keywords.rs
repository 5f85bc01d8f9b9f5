//! Keyword Suggestion Service — proposes single-word, brand-free filter
//! terms for a chosen customer category.

use std::sync::Arc;

use crate::error::SuggestError;
use crate::llm::TextGenerator;
use crate::parse::extract_comma_list;

use super::prompts::keyword_prompt;

/// Stateless service wrapping one prompt/parse round trip per call.
///
/// The prompt pins one-word/no-brand/concept-level constraints, but model
/// compliance cannot be guaranteed programmatically. The output is advisory:
/// the workflow must let the user edit the set before it filters anything.
pub struct KeywordSuggester {
    llm: Arc<dyn TextGenerator>,
    range: (usize, usize),
}

impl KeywordSuggester {
    pub fn new(llm: Arc<dyn TextGenerator>, range: (usize, usize)) -> Self {
        Self { llm, range }
    }

    /// Obtain filter keywords for `category`, informed by the user's own
    /// company `description`.
    ///
    /// `category` must be a concrete label, never the "all categories"
    /// sentinel — the workflow rejects that combination before calling.
    /// Returns lowercase tokens, deduplicated preserving order. The count is
    /// whatever the model returned; downstream filtering works with any
    /// non-negative count.
    pub async fn suggest(
        &self,
        category: &str,
        description: &str,
    ) -> Result<Vec<String>, SuggestError> {
        let prompt = keyword_prompt(category, description, self.range);
        let reply = self.llm.generate(&prompt).await?;

        let mut seen = std::collections::HashSet::new();
        let keywords: Vec<String> = extract_comma_list(&reply)
            .into_iter()
            .filter(|kw| seen.insert(kw.clone()))
            .collect();

        if keywords.is_empty() {
            tracing::warn!(model = %self.llm.model_name(), "keyword reply had no usable tokens");
            return Err(SuggestError::EmptyResponse);
        }

        tracing::info!(count = keywords.len(), category, "keyword suggestions parsed");
        Ok(keywords)
    }
}
