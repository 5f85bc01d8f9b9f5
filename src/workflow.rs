//! Workflow state machine — routes user actions to the suggestion and search
//! services and decides the next stage.
//!
//! Every action validates its inputs before mutating the session and before
//! invoking any service. Guard violations return a `ValidationError` and
//! leave the session untouched; a failed external call likewise leaves the
//! session exactly as it was before the action.

use std::sync::Arc;

use crate::config::ScoutConfig;
use crate::error::{Error, Result, ValidationError};
use crate::export::ExportFormat;
use crate::llm::TextGenerator;
use crate::parse::extract_comma_list;
use crate::search::{DirectoryProvider, LeadExportJob, LeadSearch, SearchOutcome};
use crate::session::{CategoryChoice, Session, Stage};
use crate::suggest::{CategorySuggester, KeywordSuggester};

/// The workflow engine. Stateless itself — all per-interaction state lives in
/// the `Session` passed into each action, so independent sessions can share
/// one engine.
pub struct Workflow {
    categories: CategorySuggester,
    keywords: KeywordSuggester,
    search: LeadSearch,
    export_format: ExportFormat,
}

impl Workflow {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        provider: Arc<dyn DirectoryProvider>,
        config: &ScoutConfig,
    ) -> Self {
        Self {
            categories: CategorySuggester::new(Arc::clone(&llm), config.suggestion_count),
            keywords: KeywordSuggester::new(llm, config.keyword_range),
            search: LeadSearch::new(provider, config.directory_timeout),
            export_format: config.export_format,
        }
    }

    /// `start` → `choosing_path`.
    pub fn begin(&self, session: &mut Session) -> Result<()> {
        expect_stage(session, Stage::Start, "begin")?;
        session.stage = Stage::ChoosingPath;
        Ok(())
    }

    /// `choosing_path` → `specific_search`.
    pub fn choose_specific(&self, session: &mut Session) -> Result<()> {
        expect_stage(session, Stage::ChoosingPath, "chooseSpecific")?;
        session.stage = Stage::SpecificSearch;
        Ok(())
    }

    /// `choosing_path` → `ai_assisted`.
    pub fn choose_ai_assisted(&self, session: &mut Session) -> Result<()> {
        expect_stage(session, Stage::ChoosingPath, "chooseAIAssisted")?;
        session.stage = Stage::AiAssisted;
        Ok(())
    }

    /// Step back one stage, clearing whatever the abandoned stage had
    /// accumulated.
    pub fn back(&self, session: &mut Session) -> Result<()> {
        match session.stage {
            Stage::ChoosingPath => {
                session.clear_ai_fields();
                session.location.clear();
                session.stage = Stage::Start;
            }
            Stage::AiAssisted => {
                session.clear_ai_fields();
                session.stage = Stage::ChoosingPath;
            }
            Stage::SpecificSearch
            | Stage::RefineWithAiCategories
            | Stage::SearchReady => {
                session.stage = Stage::ChoosingPath;
            }
            Stage::Start => {
                return Err(invalid_action(session, "back"));
            }
        }
        Ok(())
    }

    /// Ask the AI for customer-category suggestions from a company
    /// description. Stays in `ai_assisted`, re-rendered with results.
    pub async fn submit_description(
        &self,
        session: &mut Session,
        description: &str,
    ) -> Result<()> {
        expect_stage(session, Stage::AiAssisted, "submitDescription")?;
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }

        // External call before any mutation: a failure must not overwrite
        // previously accepted suggestions.
        let suggested = self.categories.suggest(description).await?;

        session.company_description = description.to_string();
        session.suggested_categories = suggested;
        session.selected_category = None;
        Ok(())
    }

    /// `ai_assisted` → `refine_with_ai_categories`.
    pub fn use_suggestions(&self, session: &mut Session) -> Result<()> {
        expect_stage(session, Stage::AiAssisted, "useSuggestions")?;
        if session.suggested_categories.is_empty() {
            return Err(ValidationError::NoSuggestions.into());
        }
        session.stage = Stage::RefineWithAiCategories;
        Ok(())
    }

    /// Pick one suggested category, or the "all" sentinel. Idempotent.
    pub fn select_category(&self, session: &mut Session, choice: CategoryChoice) -> Result<()> {
        expect_stage(session, Stage::RefineWithAiCategories, "selectCategory")?;
        if let CategoryChoice::One(category) = &choice {
            if !session.suggested_categories.contains(category) {
                return Err(ValidationError::UnknownCategory {
                    value: category.clone(),
                }
                .into());
            }
        }
        session.selected_category = Some(choice);
        Ok(())
    }

    /// Replace the keyword filter with user-typed comma-separated terms.
    ///
    /// AI keyword output is advisory; this is the editing step that keeps the
    /// user in control of what actually filters the search. An empty string
    /// clears the filter.
    pub fn set_keywords(&self, session: &mut Session, raw: &str) -> Result<()> {
        if !matches!(
            session.stage,
            Stage::RefineWithAiCategories | Stage::SpecificSearch
        ) {
            return Err(invalid_action(session, "setKeywords"));
        }
        let mut seen = std::collections::HashSet::new();
        session.keywords = extract_comma_list(raw)
            .into_iter()
            .filter(|kw| seen.insert(kw.clone()))
            .collect();
        Ok(())
    }

    /// Ask the AI for keyword suggestions for the selected category.
    ///
    /// Requires a single concrete category (never the "all" sentinel) and a
    /// non-empty company description; neither guard failure touches the
    /// current keyword set or calls the keyword service.
    pub async fn help_keywords(&self, session: &mut Session) -> Result<()> {
        expect_stage(session, Stage::RefineWithAiCategories, "helpKeywords")?;
        let category = match &session.selected_category {
            Some(CategoryChoice::One(category)) => category.clone(),
            Some(CategoryChoice::All) | None => {
                return Err(ValidationError::KeywordsForAllCategories.into());
            }
        };
        if session.company_description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }

        let keywords = self
            .keywords
            .suggest(&category, &session.company_description)
            .await?;

        session.keywords = keywords;
        Ok(())
    }

    /// Run the search from the AI-assisted refinement stage.
    ///
    /// Resolves the category set (a single pick, or "all" expanded to every
    /// suggested category in original order), builds a `LeadExportJob`, and
    /// invokes the search service. On success the session transitions to
    /// `search_ready`; on failure it is left unchanged.
    pub async fn submit_search(
        &self,
        session: &mut Session,
        location: &str,
    ) -> Result<SearchOutcome> {
        expect_stage(session, Stage::RefineWithAiCategories, "submitSearch")?;
        let location = location.trim();
        if location.is_empty() {
            return Err(ValidationError::EmptyLocation.into());
        }
        if session.suggested_categories.is_empty() {
            return Err(ValidationError::NoSuggestions.into());
        }

        let categories = match &session.selected_category {
            Some(CategoryChoice::One(category)) => vec![category.clone()],
            // No explicit pick means search everything suggested
            Some(CategoryChoice::All) | None => session.suggested_categories.clone(),
        };

        let job = LeadExportJob::new(
            categories,
            location.to_string(),
            session.keywords.clone(),
            self.export_format,
        );
        tracing::info!(job = %job.id, categories = job.categories.len(), "running lead search");
        let outcome = self.search.run(&job).await?;

        session.location = location.to_string();
        session.stage = Stage::SearchReady;
        Ok(outcome)
    }

    /// Run the search from the specific-search path with a typed business
    /// type. No AI-derived keywords are involved unless the user typed some
    /// via `set_keywords`.
    pub async fn submit_specific_search(
        &self,
        session: &mut Session,
        business_type: &str,
        location: &str,
    ) -> Result<SearchOutcome> {
        expect_stage(session, Stage::SpecificSearch, "submitSearch")?;
        let business_type = business_type.trim();
        if business_type.is_empty() {
            return Err(ValidationError::EmptyBusinessType.into());
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(ValidationError::EmptyLocation.into());
        }

        let job = LeadExportJob::new(
            vec![business_type.to_string()],
            location.to_string(),
            session.keywords.clone(),
            self.export_format,
        );
        tracing::info!(job = %job.id, business_type, "running specific lead search");
        let outcome = self.search.run(&job).await?;

        session.location = location.to_string();
        session.stage = Stage::SearchReady;
        Ok(outcome)
    }
}

fn expect_stage(session: &Session, expected: Stage, action: &str) -> Result<()> {
    if session.stage != expected {
        return Err(invalid_action(session, action));
    }
    Ok(())
}

fn invalid_action(session: &Session, action: &str) -> Error {
    ValidationError::InvalidAction {
        stage: session.stage.to_string(),
        action: action.to_string(),
    }
    .into()
}
