//! Category Suggestion Service — proposes customer-business categories from
//! a free-text company description.

use std::sync::Arc;

use crate::error::SuggestError;
use crate::llm::TextGenerator;
use crate::parse::extract_list_items;

use super::prompts::category_prompt;

/// Stateless service wrapping one prompt/parse round trip per call.
///
/// Input validation (non-empty description) is the workflow's job; this
/// service assumes it has already happened.
pub struct CategorySuggester {
    llm: Arc<dyn TextGenerator>,
    count: usize,
}

impl CategorySuggester {
    pub fn new(llm: Arc<dyn TextGenerator>, count: usize) -> Self {
        Self { llm, count }
    }

    /// Obtain candidate customer-business categories for `description`.
    ///
    /// One backend call, no retries. The parsed list preserves the AI's
    /// ranking order and never contains empty strings. An unparseable reply
    /// is `SuggestError::EmptyResponse`, not a panic or a partial result.
    pub async fn suggest(&self, description: &str) -> Result<Vec<String>, SuggestError> {
        let prompt = category_prompt(description, self.count);
        let reply = self.llm.generate(&prompt).await?;

        let mut categories = extract_list_items(&reply);
        if categories.is_empty() {
            tracing::warn!(model = %self.llm.model_name(), "category reply had no bullet lines");
            return Err(SuggestError::EmptyResponse);
        }
        // Models sometimes over-deliver; keep only the requested count
        categories.truncate(self.count);

        tracing::info!(count = categories.len(), "category suggestions parsed");
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TextGenerator;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl TextGenerator for FixedReply {
        async fn generate(&self, _prompt: &str) -> Result<String, SuggestError> {
            Ok(self.0.to_string())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct Unavailable;

    #[async_trait]
    impl TextGenerator for Unavailable {
        async fn generate(&self, _prompt: &str) -> Result<String, SuggestError> {
            Err(SuggestError::Unavailable {
                reason: "connection refused".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test]
    async fn parses_bullet_reply_in_order() {
        let reply = "\
- Marketing agencies
- Law offices
- Accounting firms
- Retail chains
- Logistics companies";
        let suggester = CategorySuggester::new(Arc::new(FixedReply(reply)), 5);
        let categories = suggester.suggest("cloud accounting software").await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0], "Marketing agencies");
        assert_eq!(categories[4], "Logistics companies");
        assert!(categories.iter().all(|c| !c.is_empty()));
    }

    #[tokio::test]
    async fn over_delivered_reply_is_truncated_to_requested_count() {
        let reply = "- One\n- Two\n- Three\n- Four\n- Five\n- Six\n- Seven";
        let suggester = CategorySuggester::new(Arc::new(FixedReply(reply)), 5);
        let categories = suggester.suggest("anything").await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[4], "Five");
    }

    #[tokio::test]
    async fn unparseable_reply_is_empty_response() {
        let suggester =
            CategorySuggester::new(Arc::new(FixedReply("I'd rather not say.")), 5);
        let err = suggester.suggest("anything").await.unwrap_err();
        assert!(matches!(err, SuggestError::EmptyResponse));
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let suggester = CategorySuggester::new(Arc::new(Unavailable), 5);
        let err = suggester.suggest("anything").await.unwrap_err();
        assert!(matches!(err, SuggestError::Unavailable { .. }));
    }
}
