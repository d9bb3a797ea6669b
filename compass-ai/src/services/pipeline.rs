//! Add-person pipeline orchestrator
//!
//! # State Progression
//! VALIDATE → CHECK_EXISTS → CHECK_NOTABILITY → SCORE → FINALIZE →
//! RESOLVE_REFERENCE → PERSIST → COMPLETED
//!
//! Every terminal error stops the machine where it happened; nothing is
//! persisted for a failed or cancelled run. Per-question failures are
//! absorbed inside SCORE and never end the run.
//!
//! One implementation serves both transports. Streaming and buffered callers
//! differ only in the [`ProgressSink`] they pass in.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::finalizer::finalize;
use super::model_client::{ModelClient, ModelError};
use super::notability::NotabilityGate;
use super::person_store::{PersonStore, StoreError};
use super::progress::{ProgressReporter, ProgressSink};
use super::question_bank::QuestionBank;
use super::reference::ReferenceResolver;
use super::scoring::ScoringEngine;
use crate::models::person::normalize_name;
use crate::models::{Person, PersonRecord};

pub const DUPLICATE_MESSAGE: &str = "This person already exists in the database";
pub const NOT_NOTABLE_MESSAGE: &str = "This person is not well-known enough to be added to the political compass. \
Only notable people with sufficient documentation can be added.";
pub const GENERIC_MESSAGE: &str = "An error occurred while processing your request";

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Validate,
    CheckExists,
    CheckNotability,
    Score,
    Finalize,
    ResolveReference,
    Persist,
    Completed,
}

/// Terminal pipeline failure
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing, blank or oversized name; no external calls were made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Name already stored (found by the existence check or at insert)
    #[error("Person already exists")]
    Duplicate,

    /// The model judged the name insufficiently documented
    #[error("Person is not notable")]
    NotNotable,

    #[error("Notability check failed: {0}")]
    Notability(#[source] ModelError),

    #[error("Reference lookup failed: {0}")]
    Reference(#[source] ModelError),

    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError),

    /// The requester went away; the run was abandoned
    #[error("Run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            PipelineError::Validation(msg) => msg.clone(),
            PipelineError::Duplicate => DUPLICATE_MESSAGE.to_string(),
            PipelineError::NotNotable => NOT_NOTABLE_MESSAGE.to_string(),
            PipelineError::Notability(_)
            | PipelineError::Reference(_)
            | PipelineError::Storage(_)
            | PipelineError::Cancelled => GENERIC_MESSAGE.to_string(),
        }
    }

    /// Caused by the request rather than by a dependency
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Validation(_) | PipelineError::Duplicate | PipelineError::NotNotable
        )
    }
}

impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => PipelineError::Duplicate,
            other => PipelineError::Storage(other),
        }
    }
}

/// Add-person pipeline
pub struct Pipeline {
    questions: Arc<QuestionBank>,
    store: Arc<dyn PersonStore>,
    notability: NotabilityGate,
    scoring: ScoringEngine,
    references: ReferenceResolver,
}

impl Pipeline {
    pub fn new(
        questions: Arc<QuestionBank>,
        client: Arc<dyn ModelClient>,
        store: Arc<dyn PersonStore>,
    ) -> Self {
        Self {
            questions,
            store,
            notability: NotabilityGate::new(Arc::clone(&client)),
            scoring: ScoringEngine::new(Arc::clone(&client)),
            references: ReferenceResolver::new(client),
        }
    }

    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    /// Run the pipeline for `raw_name`
    ///
    /// Progress goes to `sink`; `cancel` abandons the run at the next state
    /// boundary or question.
    pub async fn run(
        &self,
        raw_name: &str,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Person, PipelineError> {
        let run_id = Uuid::new_v4();
        let mut state = PipelineState::Validate;

        let result = self
            .run_states(run_id, raw_name, sink, cancel, &mut state)
            .await;

        match &result {
            Ok(person) => tracing::info!(
                run_id = %run_id,
                id = person.id,
                name = %person.name,
                x = person.x,
                y = person.y,
                "Person added"
            ),
            Err(e) if e.is_client_error() => {
                tracing::info!(run_id = %run_id, state = ?state, "Add rejected: {}", e)
            }
            Err(PipelineError::Cancelled) => {
                tracing::info!(run_id = %run_id, state = ?state, "Add cancelled")
            }
            Err(e) => tracing::error!(run_id = %run_id, state = ?state, error = %e, "Add failed"),
        }

        result
    }

    async fn run_states(
        &self,
        run_id: Uuid,
        raw_name: &str,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
        state: &mut PipelineState,
    ) -> Result<Person, PipelineError> {
        // VALIDATE
        let name =
            normalize_name(raw_name).map_err(|msg| PipelineError::Validation(msg.to_string()))?;
        let mut progress = ProgressReporter::new(sink, self.questions.len());

        tracing::info!(
            run_id = %run_id,
            name = %name,
            questions = self.questions.len(),
            "Starting add-person pipeline"
        );

        // CHECK_EXISTS
        enter(state, PipelineState::CheckExists, cancel)?;
        progress.step("Checking if person exists...");
        if self.store.exists(&name).await? {
            return Err(PipelineError::Duplicate);
        }

        // CHECK_NOTABILITY
        enter(state, PipelineState::CheckNotability, cancel)?;
        progress.step("Verifying notability...");
        let notable = self
            .notability
            .is_notable(&name)
            .await
            .map_err(PipelineError::Notability)?;
        if !notable {
            return Err(PipelineError::NotNotable);
        }

        // SCORE
        enter(state, PipelineState::Score, cancel)?;
        let summary = self
            .scoring
            .score(&name, self.questions.all(), &mut progress, cancel)
            .await;
        tracing::info!(
            run_id = %run_id,
            answered = summary.answered,
            failed = summary.failed,
            defaulted = summary.defaulted,
            raw_x = summary.totals.x,
            raw_y = summary.totals.y,
            "Scoring finished"
        );

        // FINALIZE
        enter(state, PipelineState::Finalize, cancel)?;
        let (x, y) = finalize(summary.totals);

        // RESOLVE_REFERENCE
        enter(state, PipelineState::ResolveReference, cancel)?;
        progress.step("Fetching Wikipedia URL...");
        let reference_url = self
            .references
            .resolve(&name)
            .await
            .map_err(PipelineError::Reference)?;

        // PERSIST
        enter(state, PipelineState::Persist, cancel)?;
        progress.step("Saving to database...");
        let record = PersonRecord {
            name,
            x,
            y,
            reference_url,
        };
        let person = self.store.insert(&record).await?;

        *state = PipelineState::Completed;
        Ok(person)
    }
}

/// Move to `next` unless the run was cancelled
fn enter(
    state: &mut PipelineState,
    next: PipelineState,
    cancel: &CancellationToken,
) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    tracing::debug!(from = ?*state, to = ?next, "Pipeline state transition");
    *state = next;
    Ok(())
}
