//! DecisionWorkflow - drives one decision through the wizard steps.
//!
//! Steps run `decision → criteria → options → analysis`. `back_to_criteria`
//! returns from options or analysis, `reset` starts over from any step.
//!
//! Validation errors reject the operation and leave the state as it was.
//! Collaborator failures (suggestions, descriptions, storage) never do: a
//! fixed fallback is substituted and a [`Notice`] is added to the outcome.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::WorkflowConfig;
use crate::domain::analysis::ScoredOption;
use crate::domain::decision::{
    Criterion, CriterionDraft, CriterionSuggestion, Decision, DecisionOption, DescriptionKind,
    Evaluation, OptionDraft, OptionSuggestion,
};
use crate::domain::foundation::{
    CriterionId, DecisionId, OptionId, SessionContext, ValidationError,
};
use crate::domain::workflow::{
    fallback_description, Notice, NoticeKind, WorkflowState, WorkflowStep, FALLBACK_CRITERIA,
    FALLBACK_OPTIONS,
};
use crate::ports::{
    AIError, AnalysisRepository, DecisionAssistant, DecisionRepository, IdGenerator,
};

use super::collaborator::with_timeout;
use super::{DescriptionBatch, RecommendationUpdater, WorkflowError};

/// Minimum criteria and options needed to leave their step.
const MIN_ENTRIES: usize = 2;

/// Collaborators a workflow talks to.
#[derive(Clone)]
pub struct WorkflowPorts {
    pub decisions: Arc<dyn DecisionRepository>,
    pub analyses: Arc<dyn AnalysisRepository>,
    pub assistant: Arc<dyn DecisionAssistant>,
    pub ids: Arc<dyn IdGenerator>,
}

/// Result of a successful operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    /// Step the workflow is in afterwards.
    pub step: WorkflowStep,
    /// Fallbacks applied along the way.
    pub notices: Vec<Notice>,
    /// Recommendation computed by this operation, if it computed one.
    pub recommendation: Option<String>,
}

impl TransitionOutcome {
    pub fn has_notice(&self, kind: NoticeKind) -> bool {
        self.notices.iter().any(|n| n.kind == kind)
    }
}

/// One user's pass through the decision wizard.
pub struct DecisionWorkflow {
    session: SessionContext,
    decisions: Arc<dyn DecisionRepository>,
    analyses: Arc<dyn AnalysisRepository>,
    assistant: Arc<dyn DecisionAssistant>,
    ids: Arc<dyn IdGenerator>,
    recommendations: RecommendationUpdater,
    descriptions: DescriptionBatch,
    timeout: Option<Duration>,
    state: WorkflowState,
}

impl DecisionWorkflow {
    pub fn new(session: SessionContext, ports: WorkflowPorts, config: &WorkflowConfig) -> Self {
        Self {
            session,
            recommendations: RecommendationUpdater::new(ports.decisions.clone()),
            descriptions: DescriptionBatch::from_config(ports.assistant.clone(), config),
            decisions: ports.decisions,
            analyses: ports.analyses,
            assistant: ports.assistant,
            ids: ports.ids,
            timeout: config.collaborator_timeout(),
            state: WorkflowState::new(),
        }
    }

    /// Continues from a previously serialized state.
    pub fn with_state(mut self, state: WorkflowState) -> Self {
        self.state = state;
        self
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> WorkflowStep {
        self.state.step()
    }

    /// Ranked options for the current state, best first.
    pub fn ranking(&self) -> Vec<ScoredOption> {
        self.state.ranking()
    }

    /// The session user's decisions, newest first.
    pub async fn list_decisions(&self) -> Result<Vec<Decision>, WorkflowError> {
        Ok(self.decisions.find_by_user(&self.session.user_id).await?)
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Stores the decision and moves on to criteria.
    ///
    /// With `use_ai` the criteria are suggested, falling back to the
    /// default pair when no usable suggestion comes back.
    pub async fn submit_decision(
        &mut self,
        title: &str,
        description: &str,
        deadline: Option<NaiveDate>,
        use_ai: bool,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("submit_decision", &[WorkflowStep::Decision])?;

        let decision = match self.state.decision() {
            Some(existing) => {
                let mut decision = existing.clone();
                decision.edit(title, description, deadline)?;
                decision
            }
            None => Decision::new(self.session.user_id.clone(), title, description, deadline)?,
        };

        let mut notices = Vec::new();
        let decision = self.persist_decision(decision, &mut notices).await;

        let criteria = if use_ai {
            Some(self.suggested_criteria(&decision, &mut notices).await)
        } else {
            None
        };

        self.state.set_decision(decision);
        if let Some(criteria) = criteria {
            self.state.replace_criteria(criteria);
        }
        self.state.advance_to(WorkflowStep::Criteria)?;

        debug!(
            decision_id = ?self.state.decision_id(),
            criteria = self.state.criteria().len(),
            "Decision submitted"
        );
        Ok(self.outcome(notices, None))
    }

    /// Accepts the edited criteria and moves on to options.
    ///
    /// Options are suggested the first time through; coming back from a
    /// later step keeps the options already there.
    pub async fn complete_criteria(
        &mut self,
        drafts: Vec<CriterionDraft>,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("complete_criteria", &[WorkflowStep::Criteria])?;

        if drafts.len() < MIN_ENTRIES {
            return Err(ValidationError::too_few("criteria", MIN_ENTRIES, drafts.len()).into());
        }
        let validated = drafts
            .iter()
            .map(CriterionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique_ids("criteria", drafts.iter().filter_map(|d| d.id))?;

        let criteria: Vec<Criterion> = drafts
            .iter()
            .zip(validated)
            .map(|(draft, (name, weight))| Criterion {
                id: draft.id.unwrap_or_else(|| self.ids.next_criterion_id()),
                name,
                weight,
                is_ai_generated: draft.is_ai_generated,
            })
            .collect();

        let mut notices = Vec::new();
        let options = if self.state.options().is_empty() {
            let (title, description) = self.decision_text();
            Some(self.suggested_options(&title, &description, &mut notices).await)
        } else {
            None
        };

        self.state.replace_criteria(criteria);
        if let Some(options) = options {
            self.state.replace_options(options);
        }
        self.state.advance_to(WorkflowStep::Options)?;

        debug!(
            criteria = self.state.criteria().len(),
            options = self.state.options().len(),
            "Criteria completed"
        );
        Ok(self.outcome(notices, None))
    }

    /// Accepts the edited options and shows the analysis.
    ///
    /// With `generate_with_ai`, options without a description get one
    /// generated; a failed generation leaves the description empty.
    pub async fn complete_options(
        &mut self,
        drafts: Vec<OptionDraft>,
        generate_with_ai: bool,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("complete_options", &[WorkflowStep::Options])?;

        if drafts.len() < MIN_ENTRIES {
            return Err(ValidationError::too_few("options", MIN_ENTRIES, drafts.len()).into());
        }
        let titles = drafts
            .iter()
            .map(OptionDraft::validated_title)
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique_ids("options", drafts.iter().filter_map(|d| d.id))?;

        let mut options: Vec<DecisionOption> = drafts
            .into_iter()
            .zip(titles)
            .map(|(draft, title)| DecisionOption {
                id: draft.id.unwrap_or_else(|| self.ids.next_option_id()),
                title,
                description: draft.description.trim().to_string(),
                is_ai_generated: draft.is_ai_generated,
            })
            .collect();

        let mut notices = Vec::new();
        if generate_with_ai {
            self.fill_descriptions(&mut options, &mut notices).await;
        }

        self.state.replace_options(options);
        self.state.advance_to(WorkflowStep::Analysis)?;

        self.save_snapshot(&mut notices).await;
        let recommendation = self.refresh_recommendation(&mut notices).await;

        debug!(
            options = self.state.options().len(),
            evaluations = self.state.evaluations().len(),
            "Options completed"
        );
        Ok(self.outcome(notices, recommendation))
    }

    /// Appends one option while the analysis is shown.
    pub async fn add_option(&mut self, title: &str) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("add_option", &[WorkflowStep::Analysis])?;
        let title = OptionDraft::new(title, "").validated_title()?;

        let mut notices = Vec::new();
        let context = self.decision_context();
        let generated = with_timeout(
            self.timeout,
            self.assistant
                .generate_description(&title, &context, DescriptionKind::Option),
        )
        .await;

        let description = match generated {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                push_warning(
                    &mut notices,
                    NoticeKind::DescriptionFallback,
                    format!("Empty description generated for '{}', using a default one", title),
                );
                fallback_description(&title, DescriptionKind::Option)
            }
            Err(e) => {
                push_warning(
                    &mut notices,
                    NoticeKind::DescriptionFallback,
                    format!("Could not generate a description for '{}' ({}), using a default one", title, e),
                );
                fallback_description(&title, DescriptionKind::Option)
            }
        };

        let option = DecisionOption::new(self.ids.next_option_id(), title, description);
        self.state.push_option(option);

        self.save_snapshot(&mut notices).await;
        let recommendation = self.refresh_recommendation(&mut notices).await;
        Ok(self.outcome(notices, recommendation))
    }

    /// Replaces every option with a fresh suggestion.
    pub async fn regenerate_options(&mut self) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("regenerate_options", &[WorkflowStep::Analysis])?;

        let mut notices = Vec::new();
        let (title, description) = self.decision_text();
        let options = self.suggested_options(&title, &description, &mut notices).await;
        self.state.replace_options(options);

        self.save_snapshot(&mut notices).await;
        let recommendation = self.refresh_recommendation(&mut notices).await;
        Ok(self.outcome(notices, recommendation))
    }

    /// Records a manual 1-10 score for one option against one criterion.
    pub async fn rate_option(
        &mut self,
        option_id: OptionId,
        criterion_id: CriterionId,
        score: u8,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step("rate_option", &[WorkflowStep::Analysis])?;
        let evaluation = Evaluation::manual(option_id, criterion_id, score)?;
        self.state.record_evaluation(evaluation)?;

        let mut notices = Vec::new();
        self.save_snapshot(&mut notices).await;
        let recommendation = self.refresh_recommendation(&mut notices).await;
        Ok(self.outcome(notices, recommendation))
    }

    /// Goes back to editing criteria. Criteria and options are kept.
    pub fn back_to_criteria(&mut self) -> Result<TransitionOutcome, WorkflowError> {
        self.require_step(
            "back_to_criteria",
            &[WorkflowStep::Options, WorkflowStep::Analysis],
        )?;
        self.state.advance_to(WorkflowStep::Criteria)?;
        Ok(self.outcome(Vec::new(), None))
    }

    /// Clears everything and returns to the first step.
    pub fn reset(&mut self) -> TransitionOutcome {
        self.state.reset();
        debug!("Workflow reset");
        self.outcome(Vec::new(), None)
    }

    /// Reopens a saved analysis of one of the session user's decisions.
    pub async fn resume(
        &mut self,
        decision_id: DecisionId,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let decision = self
            .decisions
            .find_by_id(&decision_id)
            .await?
            .filter(|d| d.user_id() == &self.session.user_id)
            .ok_or(WorkflowError::DecisionNotFound(decision_id))?;

        let snapshot = self
            .analyses
            .load_snapshot(&decision_id)
            .await?
            .ok_or(WorkflowError::AnalysisNotFound(decision_id))?;

        let recommendation = decision.ai_recommendation().map(str::to_string);
        self.state = WorkflowState::restore(decision, snapshot);

        debug!(decision_id = %decision_id, "Analysis resumed");
        Ok(self.outcome(Vec::new(), recommendation))
    }

    // ───────────────────────────────────────────────────────────────
    // Helpers
    // ───────────────────────────────────────────────────────────────

    fn require_step(
        &self,
        operation: &'static str,
        allowed: &[WorkflowStep],
    ) -> Result<(), WorkflowError> {
        let step = self.state.step();
        if allowed.contains(&step) {
            Ok(())
        } else {
            Err(WorkflowError::invalid_step(operation, step))
        }
    }

    fn outcome(&self, notices: Vec<Notice>, recommendation: Option<String>) -> TransitionOutcome {
        TransitionOutcome {
            step: self.state.step(),
            notices,
            recommendation,
        }
    }

    fn decision_text(&self) -> (String, String) {
        self.state
            .decision()
            .map(|d| (d.title().to_string(), d.description().to_string()))
            .unwrap_or_default()
    }

    fn decision_context(&self) -> String {
        self.state
            .decision()
            .map(Decision::context)
            .unwrap_or_default()
    }

    async fn persist_decision(&self, mut decision: Decision, notices: &mut Vec<Notice>) -> Decision {
        match decision.id() {
            Some(id) => {
                if let Err(e) = self.decisions.update(&decision).await {
                    push_warning(
                        notices,
                        NoticeKind::DecisionNotSaved,
                        format!("Changes to decision {} were not saved ({})", id, e),
                    );
                }
            }
            None => match self.decisions.create(&decision).await {
                Ok(id) => decision.assign_id(id),
                Err(e) => push_warning(
                    notices,
                    NoticeKind::DecisionNotSaved,
                    format!("The decision was not saved ({})", e),
                ),
            },
        }
        decision
    }

    async fn suggested_criteria(
        &self,
        decision: &Decision,
        notices: &mut Vec<Notice>,
    ) -> Vec<Criterion> {
        let suggested = with_timeout(
            self.timeout,
            self.assistant
                .suggest_criteria(decision.title(), decision.description()),
        )
        .await;

        match usable(suggested, |s: &CriterionSuggestion| !s.name.trim().is_empty()) {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| {
                    Criterion::new(self.ids.next_criterion_id(), s.name.trim(), s.weight)
                        .ai_generated()
                })
                .collect(),
            Err(reason) => {
                push_warning(
                    notices,
                    NoticeKind::CriteriaFallback,
                    format!("Suggested criteria unavailable ({}), using default criteria", reason),
                );
                FALLBACK_CRITERIA
                    .iter()
                    .map(|s| Criterion::new(self.ids.next_criterion_id(), s.name.clone(), s.weight))
                    .collect()
            }
        }
    }

    async fn suggested_options(
        &self,
        title: &str,
        description: &str,
        notices: &mut Vec<Notice>,
    ) -> Vec<DecisionOption> {
        let suggested = with_timeout(
            self.timeout,
            self.assistant.suggest_options(title, description),
        )
        .await;

        match usable(suggested, |s: &OptionSuggestion| !s.title.trim().is_empty()) {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| {
                    DecisionOption::new(
                        self.ids.next_option_id(),
                        s.title.trim(),
                        s.description.trim(),
                    )
                    .ai_generated()
                })
                .collect(),
            Err(reason) => {
                push_warning(
                    notices,
                    NoticeKind::OptionsFallback,
                    format!("Suggested options unavailable ({}), using placeholder options", reason),
                );
                FALLBACK_OPTIONS
                    .iter()
                    .map(|s| {
                        DecisionOption::new(
                            self.ids.next_option_id(),
                            s.title.clone(),
                            s.description.clone(),
                        )
                    })
                    .collect()
            }
        }
    }

    async fn fill_descriptions(&self, options: &mut [DecisionOption], notices: &mut Vec<Notice>) {
        let missing: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.lacks_description())
            .map(|(i, _)| i)
            .collect();
        if missing.is_empty() {
            return;
        }

        let titles: Vec<String> = missing.iter().map(|&i| options[i].title.clone()).collect();
        let context = self.decision_context();
        let results = self
            .descriptions
            .generate(&titles, &context, DescriptionKind::Option)
            .await;

        for (index, result) in missing.into_iter().zip(results) {
            match result {
                Ok(text) => options[index].description = text.trim().to_string(),
                Err(e) => push_warning(
                    notices,
                    NoticeKind::DescriptionFallback,
                    format!(
                        "Could not generate a description for '{}' ({})",
                        options[index].title, e
                    ),
                ),
            }
        }
    }

    async fn save_snapshot(&self, notices: &mut Vec<Notice>) {
        let Some(decision_id) = self.state.decision_id() else {
            debug!("Decision has no id, analysis not saved");
            return;
        };

        if let Err(e) = self
            .analyses
            .save_snapshot(&decision_id, &self.state.snapshot())
            .await
        {
            push_warning(
                notices,
                NoticeKind::AnalysisNotSaved,
                format!("The analysis was not saved ({})", e),
            );
        }
    }

    async fn refresh_recommendation(&mut self, notices: &mut Vec<Notice>) -> Option<String> {
        let recommendation = self
            .recommendations
            .recompute(
                self.state.decision_id(),
                self.state.options(),
                self.state.criteria(),
                self.state.evaluations().as_slice(),
            )
            .await?;

        self.state.set_recommendation(Some(recommendation.title.clone()));
        if !recommendation.persisted {
            notices.push(Notice::warning(
                NoticeKind::RecommendationNotSaved,
                format!("Recommendation '{}' was not saved", recommendation.title),
            ));
        }
        Some(recommendation.title)
    }
}

/// Keeps the entries accepted by `keep`; failure or nothing left is an error.
fn usable<T>(result: Result<Vec<T>, AIError>, keep: impl Fn(&T) -> bool) -> Result<Vec<T>, String> {
    let items: Vec<T> = result
        .map_err(|e| e.to_string())?
        .into_iter()
        .filter(|item| keep(item))
        .collect();
    if items.is_empty() {
        return Err("no usable suggestion".to_string());
    }
    Ok(items)
}

/// Rejects a form whose rows carry the same id twice.
fn ensure_unique_ids<T>(
    field: &str,
    ids: impl IntoIterator<Item = T>,
) -> Result<(), ValidationError>
where
    T: Eq + Hash + fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(ValidationError::duplicate(field, id));
        }
        seen.insert(id);
    }
    Ok(())
}

fn push_warning(notices: &mut Vec<Notice>, kind: NoticeKind, message: String) {
    warn!(kind = ?kind, "{}", message);
    notices.push(Notice::warning(kind, message));
}
