//! End-to-end workflow tests with a scripted generator and an in-memory
//! directory provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use lead_scout::config::ScoutConfig;
use lead_scout::error::{Error, SearchError, SuggestError, ValidationError};
use lead_scout::export::ExportFormat;
use lead_scout::llm::TextGenerator;
use lead_scout::search::{DirectoryProvider, RawListing, SearchOutcome};
use lead_scout::session::{CategoryChoice, Session, Stage};
use lead_scout::workflow::Workflow;

struct ScriptedGenerator {
    category_reply: &'static str,
    keyword_reply: &'static str,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
        if prompt.contains("business types") {
            Ok(self.category_reply.to_string())
        } else {
            Ok(self.keyword_reply.to_string())
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, SuggestError> {
        Err(SuggestError::Unavailable {
            reason: "quota exceeded".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "down"
    }
}

struct StaticProvider {
    by_category: HashMap<String, Vec<RawListing>>,
}

#[async_trait]
impl DirectoryProvider for StaticProvider {
    async fn query(
        &self,
        category: &str,
        _location: &str,
    ) -> Result<Vec<RawListing>, SearchError> {
        Ok(self.by_category.get(category).cloned().unwrap_or_default())
    }
}

fn listing(name: &str, address: &str, description: &str) -> RawListing {
    RawListing {
        name: name.to_string(),
        address: address.to_string(),
        contact: format!("contact@{}.example", name.to_lowercase().replace(' ', "-")),
        description: description.to_string(),
    }
}

const CATEGORY_REPLY: &str = "\
Here are some ideas:
- Marketing agencies
- Law offices
- Accounting firms
- Retail chains
- Logistics companies";

fn full_stack() -> Workflow {
    let generator = Arc::new(ScriptedGenerator {
        category_reply: CATEGORY_REPLY,
        keyword_reply: "Software, Cloud , invoicing, SaaS",
    });

    let mut by_category = HashMap::new();
    by_category.insert(
        "Marketing agencies".to_string(),
        vec![
            listing("AdWorks", "Gran Via 1, Madrid", "full-service agency, cloud tooling"),
            listing("BrandCo", "Gran Via 2, Madrid", "print and outdoor campaigns"),
        ],
    );
    by_category.insert(
        "Law offices".to_string(),
        vec![
            // Same business listed under a second category
            listing("AdWorks", "Gran Via 1, Madrid", "full-service agency, cloud tooling"),
            listing("LexFirm", "Serrano 5, Madrid", "corporate law, invoicing software users"),
        ],
    );
    let provider = Arc::new(StaticProvider { by_category });

    Workflow::new(generator, provider, &ScoutConfig::default())
}

#[tokio::test]
async fn end_to_end_ai_assisted_search() {
    let workflow = full_stack();
    let mut session = Session::new();

    workflow.begin(&mut session).unwrap();
    workflow.choose_ai_assisted(&mut session).unwrap();
    workflow
        .submit_description(
            &mut session,
            "We sell cloud accounting software for small businesses in Spain",
        )
        .await
        .unwrap();

    assert_eq!(session.suggested_categories.len(), 5);
    assert!(session.suggested_categories.iter().all(|c| !c.is_empty()));
    assert_eq!(session.suggested_categories[0], "Marketing agencies");

    workflow.use_suggestions(&mut session).unwrap();
    workflow
        .select_category(
            &mut session,
            CategoryChoice::One("Marketing agencies".to_string()),
        )
        .unwrap();

    workflow.help_keywords(&mut session).await.unwrap();
    assert_eq!(session.keywords, vec!["software", "cloud", "invoicing", "saas"]);
    assert!(
        session
            .keywords
            .iter()
            .all(|kw| !kw.contains(' ') && *kw == kw.to_lowercase())
    );

    let outcome = workflow
        .submit_search(&mut session, "Madrid, Spain")
        .await
        .unwrap();
    assert_eq!(session.stage, Stage::SearchReady);

    let SearchOutcome::Exported(artifact) = outcome else {
        panic!("expected an export artifact");
    };
    // Only AdWorks mentions a keyword ("cloud")
    assert_eq!(artifact.len(), 1);
    assert_eq!(artifact.rows[0][0], "AdWorks");
    assert_eq!(artifact.rows[0][4], "cloud");

    let csv = artifact.render();
    assert!(csv.starts_with("name,address,contact,categories,matched_keywords\n"));
}

#[tokio::test]
async fn all_categories_mode_deduplicates_shared_business() {
    let workflow = full_stack();
    let mut session = Session::new();

    workflow.begin(&mut session).unwrap();
    workflow.choose_ai_assisted(&mut session).unwrap();
    workflow
        .submit_description(&mut session, "cloud accounting software")
        .await
        .unwrap();
    workflow.use_suggestions(&mut session).unwrap();
    workflow
        .select_category(&mut session, CategoryChoice::All)
        .unwrap();

    // No keyword filter: every unique listing survives
    let outcome = workflow
        .submit_search(&mut session, "Madrid, Spain")
        .await
        .unwrap();
    let SearchOutcome::Exported(artifact) = outcome else {
        panic!("expected an export artifact");
    };

    let adworks_rows: Vec<_> = artifact
        .rows
        .iter()
        .filter(|row| row[0] == "AdWorks")
        .collect();
    assert_eq!(adworks_rows.len(), 1, "shared business must appear once");
    assert_eq!(adworks_rows[0][3], "Marketing agencies; Law offices");
    assert_eq!(artifact.len(), 3);
}

#[tokio::test]
async fn ai_failure_leaves_session_unchanged() {
    let workflow = Workflow::new(
        Arc::new(FailingGenerator),
        Arc::new(StaticProvider {
            by_category: HashMap::new(),
        }),
        &ScoutConfig::default(),
    );
    let mut session = Session::new();
    workflow.begin(&mut session).unwrap();
    workflow.choose_ai_assisted(&mut session).unwrap();

    let err = workflow
        .submit_description(&mut session, "a perfectly good description")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Suggest(SuggestError::Unavailable { .. })
    ));
    assert_eq!(session.stage, Stage::AiAssisted);
    assert!(session.company_description.is_empty());
    assert!(session.suggested_categories.is_empty());
}

#[tokio::test]
async fn empty_directory_is_no_results_not_an_error() {
    let generator = Arc::new(ScriptedGenerator {
        category_reply: CATEGORY_REPLY,
        keyword_reply: "software",
    });
    let workflow = Workflow::new(
        generator,
        Arc::new(StaticProvider {
            by_category: HashMap::new(),
        }),
        &ScoutConfig::default(),
    );
    let mut session = Session::new();
    workflow.begin(&mut session).unwrap();
    workflow.choose_specific(&mut session).unwrap();

    let outcome = workflow
        .submit_specific_search(&mut session, "Pet shops", "Madrid, Spain")
        .await
        .unwrap();
    assert!(matches!(outcome, SearchOutcome::NoResults));
    assert_eq!(session.stage, Stage::SearchReady);
}

#[tokio::test]
async fn guard_violation_mid_flow_never_calls_services() {
    let workflow = Workflow::new(
        // A generator that would blow up the keyword assertion if called
        Arc::new(FailingGenerator),
        Arc::new(StaticProvider {
            by_category: HashMap::new(),
        }),
        &ScoutConfig::default(),
    );
    let mut session = Session::new();
    workflow.begin(&mut session).unwrap();
    workflow.choose_ai_assisted(&mut session).unwrap();

    // help_keywords is not even a valid action in this stage
    let err = workflow.help_keywords(&mut session).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidAction { .. })));
    assert!(session.keywords.is_empty());
}

#[tokio::test]
async fn json_export_format_is_honored() {
    let generator = Arc::new(ScriptedGenerator {
        category_reply: CATEGORY_REPLY,
        keyword_reply: "software",
    });
    let mut by_category = HashMap::new();
    by_category.insert(
        "Pet shops".to_string(),
        vec![listing("Mundo Animal", "Calle Mayor 1", "feed and toys")],
    );
    let config = ScoutConfig {
        export_format: ExportFormat::Json,
        ..Default::default()
    };
    let workflow = Workflow::new(
        generator,
        Arc::new(StaticProvider { by_category }),
        &config,
    );
    let mut session = Session::new();
    workflow.begin(&mut session).unwrap();
    workflow.choose_specific(&mut session).unwrap();

    let outcome = workflow
        .submit_specific_search(&mut session, "Pet shops", "Madrid, Spain")
        .await
        .unwrap();
    let SearchOutcome::Exported(artifact) = outcome else {
        panic!("expected an export artifact");
    };
    assert_eq!(artifact.file_name, "leads-pet-shops.json");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&artifact.render()).unwrap();
    assert_eq!(parsed[0]["name"], "Mundo Animal");
}
