//! Demo runner: walks one decision through the whole workflow and prints
//! the ranking as JSON.
//!
//! Usage: `decision-compass [TITLE] [DESCRIPTION]`
//!
//! Storage is PostgreSQL when `DECISION_COMPASS__DATABASE__URL` is set,
//! in-memory otherwise. Suggestions come from OpenAI when
//! `DECISION_COMPASS__AI__ENABLED=true`; without it every suggestion falls
//! back to the defaults.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use decision_compass::adapters::ai::{
    DisabledAIProvider, LlmDecisionAssistant, OpenAIConfig, OpenAIProvider,
};
use decision_compass::adapters::ids::UuidIdGenerator;
use decision_compass::adapters::postgres::{
    self, PostgresAnalysisRepository, PostgresDecisionRepository,
};
use decision_compass::adapters::storage::{InMemoryAnalysisRepository, InMemoryDecisionRepository};
use decision_compass::application::{DecisionWorkflow, TransitionOutcome, WorkflowPorts};
use decision_compass::config::{AppConfig, LogFormat, ServerConfig};
use decision_compass::domain::decision::{CriterionDraft, OptionDraft};
use decision_compass::domain::foundation::SessionContext;
use decision_compass::ports::{AIProvider, AnalysisRepository, DecisionRepository};

const DEFAULT_TITLE: &str = "Choisir une voiture";
const DEMO_USER: &str = "demo-user";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let mut args = std::env::args().skip(1);
    let title = args.next().unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = args.next().unwrap_or_default();

    let (decisions, analyses) = storage(&config).await?;
    let provider = ai_provider(&config)?;
    let session = SessionContext::for_user(DEMO_USER)?;

    let ports = WorkflowPorts {
        decisions,
        analyses,
        assistant: Arc::new(LlmDecisionAssistant::new(provider).for_user(session.user_id.clone())),
        ids: Arc::new(UuidIdGenerator),
    };
    let mut workflow = DecisionWorkflow::new(session, ports, &config.workflow);

    let outcome = workflow
        .submit_decision(&title, &description, None, true)
        .await?;
    report(&outcome);

    let criteria = workflow
        .state()
        .criteria()
        .iter()
        .map(CriterionDraft::from)
        .collect();
    report(&workflow.complete_criteria(criteria).await?);

    let options = workflow
        .state()
        .options()
        .iter()
        .map(OptionDraft::from)
        .collect();
    let outcome = workflow.complete_options(options, true).await?;
    report(&outcome);

    if let Some(recommendation) = &outcome.recommendation {
        info!(recommendation = %recommendation, "Analysis complete");
    }
    println!("{}", serde_json::to_string_pretty(&workflow.ranking())?);
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = match server.log_format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

async fn storage(
    config: &AppConfig,
) -> Result<(Arc<dyn DecisionRepository>, Arc<dyn AnalysisRepository>), Box<dyn Error>> {
    match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            info!("Using PostgreSQL storage");
            let decisions: Arc<dyn DecisionRepository> =
                Arc::new(PostgresDecisionRepository::new(pool.clone()));
            let analyses: Arc<dyn AnalysisRepository> =
                Arc::new(PostgresAnalysisRepository::new(pool));
            Ok((decisions, analyses))
        }
        None => {
            info!("Using in-memory storage");
            let decisions: Arc<dyn DecisionRepository> = Arc::new(InMemoryDecisionRepository::new());
            let analyses: Arc<dyn AnalysisRepository> = Arc::new(InMemoryAnalysisRepository::new());
            Ok((decisions, analyses))
        }
    }
}

fn ai_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, Box<dyn Error>> {
    let provider: Arc<dyn AIProvider> =
        match OpenAIConfig::from_settings(&config.ai).filter(|_| config.ai.enabled) {
            Some(openai) => {
                info!(model = %openai.model, "Using OpenAI provider");
                Arc::new(OpenAIProvider::new(openai)?)
            }
            None => {
                warn!("AI disabled, default suggestions will be used");
                Arc::new(DisabledAIProvider::default())
            }
        };
    Ok(provider)
}

fn report(outcome: &TransitionOutcome) {
    info!(step = %outcome.step, notices = outcome.notices.len(), "Step completed");
    for notice in &outcome.notices {
        eprintln!("[{:?}] {}", notice.level, notice.message);
    }
}
