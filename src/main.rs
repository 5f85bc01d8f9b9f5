//! CLI collaborator for the lead-discovery workflow.
//!
//! Renders the current stage, collects input fields, and invokes workflow
//! operations. It owns no business logic: every guard, prompt, and parse
//! lives in the library.

use std::io::Write as _;
use std::sync::Arc;

use lead_scout::config::ScoutConfig;
use lead_scout::error::Error;
use lead_scout::llm::{LlmBackend, LlmConfig, create_generator};
use lead_scout::search::{HttpDirectoryProvider, SearchOutcome};
use lead_scout::session::{CategoryChoice, Session, Stage};
use lead_scout::workflow::Workflow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Read API key from environment
    let api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: ANTHROPIC_API_KEY not set");
        eprintln!("  export ANTHROPIC_API_KEY=sk-ant-...");
        std::process::exit(1);
    });

    let model = std::env::var("LEAD_SCOUT_MODEL")
        .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

    let directory_url = std::env::var("LEAD_SCOUT_DIRECTORY_URL").unwrap_or_else(|_| {
        eprintln!("Error: LEAD_SCOUT_DIRECTORY_URL not set");
        eprintln!("  export LEAD_SCOUT_DIRECTORY_URL=https://directory.example/search");
        std::process::exit(1);
    });
    let directory_key = std::env::var("LEAD_SCOUT_DIRECTORY_KEY")
        .ok()
        .map(secrecy::SecretString::from);

    eprintln!("🎯 Lead Scout v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", model);
    eprintln!("   Directory: {}\n", directory_url);

    let llm_config = LlmConfig {
        backend: LlmBackend::Anthropic,
        api_key: secrecy::SecretString::from(api_key),
        model,
    };
    let llm = match create_generator(&llm_config) {
        Ok(llm) => llm,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let provider = Arc::new(HttpDirectoryProvider::new(directory_url, directory_key));
    let config = ScoutConfig::default();
    let workflow = Workflow::new(llm, provider, &config);

    let mut session = Session::new();
    run_loop(&workflow, &mut session).await;
    Ok(())
}

/// One action per iteration: render the stage, read the trigger, invoke the
/// workflow, report the result. Failures only abort the current action.
async fn run_loop(workflow: &Workflow, session: &mut Session) {
    loop {
        render_stage(session);
        let result = match session.stage {
            Stage::Start => start_action(workflow, session),
            Stage::ChoosingPath => choosing_action(workflow, session),
            Stage::AiAssisted => ai_assisted_action(workflow, session).await,
            Stage::RefineWithAiCategories => refine_action(workflow, session).await,
            Stage::SpecificSearch => specific_action(workflow, session).await,
            Stage::SearchReady => {
                println!("Search complete. [n]ew search or [q]uit?");
                match read_line().as_str() {
                    "n" => workflow.back(session),
                    _ => return,
                }
            }
        };
        if let Err(e) = result {
            report_failure(&e);
        }
    }
}

fn render_stage(session: &Session) {
    println!("\n── stage: {} ──", session.stage);
    if !session.suggested_categories.is_empty()
        && matches!(
            session.stage,
            Stage::AiAssisted | Stage::RefineWithAiCategories
        )
    {
        println!("Suggested categories:");
        for (i, category) in session.suggested_categories.iter().enumerate() {
            println!("  {}. {}", i + 1, category);
        }
    }
    if !session.keywords.is_empty() {
        println!("Keywords: {}", session.keywords.join(", "));
    }
}

fn start_action(workflow: &Workflow, session: &mut Session) -> Result<(), Error> {
    println!("Welcome to Lead Scout. Press Enter to begin.");
    read_line();
    workflow.begin(session)
}

fn choosing_action(workflow: &Workflow, session: &mut Session) -> Result<(), Error> {
    println!("How do you want to find leads? [1] I know the business type  [2] Let the AI help  [b]ack");
    match read_line().as_str() {
        "1" => workflow.choose_specific(session),
        "2" => workflow.choose_ai_assisted(session),
        _ => workflow.back(session),
    }
}

async fn ai_assisted_action(workflow: &Workflow, session: &mut Session) -> Result<(), Error> {
    if session.suggested_categories.is_empty() {
        println!("Describe your company (what you sell, who it serves):");
        let description = read_line();
        workflow.submit_description(session, &description).await
    } else {
        println!("[u]se these suggestions, [r]etry with a new description, or [b]ack?");
        match read_line().as_str() {
            "u" => workflow.use_suggestions(session),
            "r" => {
                println!("Describe your company:");
                let description = read_line();
                workflow.submit_description(session, &description).await
            }
            _ => workflow.back(session),
        }
    }
}

async fn refine_action(workflow: &Workflow, session: &mut Session) -> Result<(), Error> {
    println!(
        "[number] pick a category, [a]ll categories, [k]eyword help, [e]dit keywords, [s]earch, [b]ack"
    );
    match read_line().as_str() {
        "a" => workflow.select_category(session, CategoryChoice::All),
        "k" => workflow.help_keywords(session).await,
        "e" => {
            println!("Keywords (comma-separated, empty to clear):");
            let raw = read_line();
            workflow.set_keywords(session, &raw)
        }
        "s" => {
            println!("Location (City, Country):");
            let location = read_line();
            let outcome = workflow.submit_search(session, &location).await?;
            report_outcome(outcome)
        }
        "b" => workflow.back(session),
        input => match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= session.suggested_categories.len() => {
                let category = session.suggested_categories[n - 1].clone();
                workflow.select_category(session, CategoryChoice::One(category))
            }
            _ => {
                println!("Unrecognized choice.");
                Ok(())
            }
        },
    }
}

async fn specific_action(workflow: &Workflow, session: &mut Session) -> Result<(), Error> {
    println!("Business type (or [b]ack):");
    let business_type = read_line();
    if business_type == "b" {
        return workflow.back(session);
    }
    println!("Location (City, Country):");
    let location = read_line();
    let outcome = workflow
        .submit_specific_search(session, &business_type, &location)
        .await?;
    report_outcome(outcome)
}

fn report_outcome(outcome: SearchOutcome) -> Result<(), Error> {
    match outcome {
        SearchOutcome::Exported(artifact) => {
            if let Err(e) = std::fs::write(&artifact.file_name, artifact.render()) {
                eprintln!("Could not write {}: {}", artifact.file_name, e);
            } else {
                println!("✅ {} leads exported to {}", artifact.len(), artifact.file_name);
            }
        }
        SearchOutcome::NoResults => {
            println!("No businesses matched. Try fewer keywords or a broader location.");
        }
    }
    Ok(())
}

fn report_failure(error: &Error) {
    match error {
        Error::Validation(e) => println!("⚠️  {e}"),
        Error::Suggest(e) => println!("🤖 {e}"),
        Error::Search(e) => println!("🔍 {e}"),
        Error::Config(e) => println!("⚙️  {e}"),
    }
}

fn read_line() -> String {
    print!("> ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}
