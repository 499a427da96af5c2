//! WizardController — owns the brief and the current step, and coordinates
//! validation, submission and the scheduling handoff.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::brief::{Field, FieldValue, FormData};
use crate::config::IntakeConfig;
use crate::error::WizardError;
use crate::submission::{SubmissionClient, SubmissionMode, SubmissionResult};

use super::scheduling::{EmbedStatus, SchedulingEmbed};
use super::step::WizardStep;

/// Events emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Edit { field: Field, value: String },
    Advance,
    Retreat,
    Submit,
    SchedulerReady,
}

/// In-memory wizard state. Only the controller mutates it.
#[derive(Debug, Clone)]
struct WizardState {
    step: WizardStep,
    data: FormData,
    submitting: bool,
    mode: Option<SubmissionMode>,
    message: Option<String>,
    scheduling: SchedulingEmbed,
}

impl WizardState {
    /// Move along the transition table; anything else is a no-op.
    fn transition(&mut self, target: WizardStep) -> bool {
        if !self.step.can_transition_to(target) {
            return false;
        }
        self.step = target;
        true
    }
}

/// Clear the in-flight flag and apply a finished attempt.
async fn record_outcome(
    state: &RwLock<WizardState>,
    result: SubmissionResult,
) -> Result<SubmissionMode, WizardError> {
    tracing::debug!(outcome = %result.to_json(), "Submission attempt finished");
    let mut state = state.write().await;
    state.submitting = false;
    match result {
        SubmissionResult::Delivered { mode } => {
            let from = state.step;
            state.transition(WizardStep::Confirm);
            state.mode = Some(mode);
            state.scheduling.open();
            tracing::info!(from = %from, mode = %mode, "Brief submitted");
            Ok(mode)
        }
        SubmissionResult::Failed(e) => {
            tracing::warn!(step = %state.step, error = %e, "Brief submission failed");
            let message = e.to_string();
            state.message = Some(message.clone());
            Err(WizardError::Rejected(message))
        }
    }
}

/// One field as the presentation layer should render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: FieldValue,
    pub required: bool,
    pub missing: bool,
}

/// Scheduling widget as the presentation layer should render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingView {
    pub url: String,
    pub status: EmbedStatus,
}

/// Snapshot of everything the presentation layer needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub step_index: usize,
    pub step_count: usize,
    pub title: &'static str,
    /// Fields edited on this step, or the whole brief on review.
    pub fields: Vec<FieldView>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub can_submit: bool,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SubmissionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingView>,
}

/// Drives the intake wizard.
pub struct WizardController {
    client: Arc<dyn SubmissionClient>,
    state: Arc<RwLock<WizardState>>,
}

impl WizardController {
    pub fn new(config: &IntakeConfig, client: Arc<dyn SubmissionClient>) -> Self {
        Self::with_data(config, client, FormData::default())
    }

    /// Start with a pre-filled brief (e.g. query parameters from a landing
    /// page link).
    pub fn with_data(
        config: &IntakeConfig,
        client: Arc<dyn SubmissionClient>,
        data: FormData,
    ) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(WizardState {
                step: WizardStep::default(),
                data,
                submitting: false,
                mode: None,
                message: None,
                scheduling: SchedulingEmbed::new(config.scheduling_url.clone()),
            })),
        }
    }

    pub async fn current_step(&self) -> WizardStep {
        self.state.read().await.step
    }

    pub async fn data(&self) -> FormData {
        self.state.read().await.data.clone()
    }

    /// Mode recorded by the last successful submission.
    pub async fn mode(&self) -> Option<SubmissionMode> {
        self.state.read().await.mode
    }

    pub async fn message(&self) -> Option<String> {
        self.state.read().await.message.clone()
    }

    /// Move to the next step. Stops at review; confirm is only reached by
    /// submitting.
    pub async fn advance(&self) -> WizardStep {
        let mut state = self.state.write().await;
        if let Some(next) = state.step.next() {
            state.transition(next);
        }
        state.step
    }

    /// Move to the previous step. Stops at contact, and at confirm.
    pub async fn retreat(&self) -> WizardStep {
        let mut state = self.state.write().await;
        if let Some(prev) = state.step.previous() {
            state.transition(prev);
        }
        state.step
    }

    /// Update one field of the brief.
    pub async fn set_field(&self, field: Field, value: &str) -> Result<(), WizardError> {
        let mut state = self.state.write().await;
        if state.step.is_terminal() {
            return Err(WizardError::AlreadyConfirmed);
        }
        match state.data.set(field, value) {
            Ok(()) => {
                state.message = None;
                Ok(())
            }
            Err(e) => {
                state.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Validate the brief and hand it to the submission client.
    ///
    /// On success the wizard jumps straight to confirm, whatever step it was
    /// on. On failure the step is left alone so the client can retry.
    pub async fn submit(&self) -> Result<SubmissionMode, WizardError> {
        let payload = {
            let mut state = self.state.write().await;
            if state.step.is_terminal() {
                return Err(WizardError::AlreadyConfirmed);
            }
            if state.submitting {
                return Err(WizardError::AlreadySubmitting);
            }
            if let Err(e) = state.data.validate() {
                tracing::debug!(step = %state.step, error = %e, "Brief failed validation");
                state.message = Some(e.to_string());
                return Err(e);
            }
            state.submitting = true;
            state.message = None;
            state.data.clone()
        };

        // The attempt runs in its own task so the outcome is recorded even
        // if the caller stops waiting for it.
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let attempt = tokio::spawn(async move {
            let result = client.submit(&payload).await;
            record_outcome(&state, result).await
        });

        match attempt.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Submission task failed");
                let message = format!("Submission interrupted: {e}");
                let mut state = self.state.write().await;
                state.submitting = false;
                state.message = Some(message.clone());
                Err(WizardError::Rejected(message))
            }
        }
    }

    /// Host reports the scheduling widget finished loading.
    pub async fn scheduler_ready(&self) {
        let mut state = self.state.write().await;
        if state.scheduling.mark_ready() {
            tracing::debug!(url = state.scheduling.url(), "Scheduling widget ready");
        }
    }

    /// Apply one presentation-layer event.
    pub async fn handle(&self, event: WizardEvent) -> Result<(), WizardError> {
        match event {
            WizardEvent::Edit { field, value } => self.set_field(field, &value).await,
            WizardEvent::Advance => {
                self.advance().await;
                Ok(())
            }
            WizardEvent::Retreat => {
                self.retreat().await;
                Ok(())
            }
            WizardEvent::Submit => self.submit().await.map(|_| ()),
            WizardEvent::SchedulerReady => {
                self.scheduler_ready().await;
                Ok(())
            }
        }
    }

    /// Snapshot for rendering.
    pub async fn view(&self) -> WizardView {
        let state = self.state.read().await;
        let step = state.step;
        let missing = state.data.missing_required();

        let fields = match step {
            editable if editable.collects_input() => Field::ALL
                .into_iter()
                .filter(|f| f.step() == editable)
                .collect(),
            WizardStep::Review => Field::ALL.to_vec(),
            _ => Vec::new(),
        }
        .into_iter()
        .map(|field| FieldView {
            field,
            label: field.label(),
            value: state.data.get(field),
            required: field.is_required(),
            missing: missing.contains(&field),
        })
        .collect();

        WizardView {
            step,
            step_index: step.index(),
            step_count: WizardStep::COUNT,
            title: step.title(),
            fields,
            can_advance: step.next().is_some(),
            can_retreat: step.previous().is_some(),
            can_submit: step == WizardStep::Review && !state.submitting,
            submitting: state.submitting,
            message: state.message.clone(),
            mode: state.mode,
            scheduling: step.is_terminal().then(|| SchedulingView {
                url: state.scheduling.url().to_string(),
                status: state.scheduling.status(),
            }),
        }
    }
}
