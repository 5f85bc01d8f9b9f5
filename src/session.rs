//! Session state — tracks which stage of the lead-discovery flow the user
//! is in and the data accumulated so far.

use serde::{Deserialize, Serialize};

/// The stages of a lead-discovery session.
///
/// `Start` → `ChoosingPath` → { `SpecificSearch` | `AiAssisted` →
/// `RefineWithAiCategories` } → `SearchReady`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    ChoosingPath,
    SpecificSearch,
    AiAssisted,
    RefineWithAiCategories,
    SearchReady,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Start, ChoosingPath)
                | (ChoosingPath, SpecificSearch)
                | (ChoosingPath, AiAssisted)
                | (ChoosingPath, Start)
                | (AiAssisted, RefineWithAiCategories)
                | (AiAssisted, ChoosingPath)
                | (RefineWithAiCategories, SearchReady)
                | (RefineWithAiCategories, ChoosingPath)
                | (SpecificSearch, SearchReady)
                | (SpecificSearch, ChoosingPath)
                | (SearchReady, ChoosingPath)
        )
    }

    /// Whether this stage is terminal for the current interaction.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SearchReady)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Start
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::ChoosingPath => "choosing_path",
            Self::SpecificSearch => "specific_search",
            Self::AiAssisted => "ai_assisted",
            Self::RefineWithAiCategories => "refine_with_ai_categories",
            Self::SearchReady => "search_ready",
        };
        write!(f, "{s}")
    }
}

/// The user's category selection in the refinement stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryChoice {
    /// Search every suggested category.
    All,
    /// Search a single suggested category.
    One(String),
}

impl std::fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all suggested categories"),
            Self::One(category) => write!(f, "{category}"),
        }
    }
}

/// The unit of state for one user interaction sequence.
///
/// Created with defaults at the start of a sequence and mutated only by the
/// workflow in response to a validated action. Guard violations never touch
/// it; a failed external call leaves it exactly as it was.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Current stage.
    pub stage: Stage,
    /// Free-text description of the user's own company.
    pub company_description: String,
    /// Categories suggested by the AI, in the AI's ranking order.
    pub suggested_categories: Vec<String>,
    /// The category the user picked for refinement, if any.
    pub selected_category: Option<CategoryChoice>,
    /// Search location ("City, Country").
    pub location: String,
    /// Keyword filter — lowercase single-word tokens, editable by the user.
    pub keywords: Vec<String>,
}

impl Session {
    /// Create a fresh session at the start stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything accumulated by the AI-assisted path.
    pub(crate) fn clear_ai_fields(&mut self) {
        self.company_description.clear();
        self.suggested_categories.clear();
        self.selected_category = None;
        self.keywords.clear();
    }
}
