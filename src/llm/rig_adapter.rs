//! Adapter bridging rig's `CompletionModel` trait to our `TextGenerator`.

use async_trait::async_trait;

use rig::completion::{AssistantContent, CompletionModel, Message};

use crate::error::SuggestError;
use crate::llm::TextGenerator;

/// Wraps a rig completion model behind the one-prompt/one-reply contract.
pub struct RigAdapter<M: CompletionModel> {
    model: M,
    model_name: String,
}

impl<M: CompletionModel> RigAdapter<M> {
    pub fn new(model: M, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }
}

#[async_trait]
impl<M: CompletionModel> TextGenerator for RigAdapter<M> {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
        let request = self
            .model
            .completion_request(Message::user(prompt))
            .build();

        let response =
            self.model
                .completion(request)
                .await
                .map_err(|e| SuggestError::Unavailable {
                    reason: e.to_string(),
                })?;

        let text = response
            .choice
            .into_iter()
            .filter_map(|content| match content {
                AssistantContent::Text(text) => Some(text.text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(model = %self.model_name, chars = text.len(), "LLM reply received");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
