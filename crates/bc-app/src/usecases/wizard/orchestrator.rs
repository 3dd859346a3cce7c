//! Wizard orchestrator.
//!
//! Drives a [`WizardMachine`] and runs the side effects it requests. The
//! machine itself stays pure; this is the only place a wizard touches the
//! network.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};

use bc_core::error::{ApiError, ErrorMessages};
use bc_core::form::{Draft, FieldValue, FormField};
use bc_core::ports::{SubmissionPort, SubmissionReceipt};
use bc_core::wizard::{WizardAction, WizardEvent, WizardMachine, WizardSnapshot};

struct WizardSession<F: FormField + 'static> {
    machine: WizardMachine<F>,
    receipt: Option<SubmissionReceipt>,
}

/// Async front of one wizard instance.
pub struct WizardOrchestrator<F: FormField + 'static> {
    flow: &'static str,
    session: Mutex<WizardSession<F>>,
    submission: Arc<dyn SubmissionPort<F>>,
    messages: ErrorMessages,
}

impl<F: FormField> WizardOrchestrator<F> {
    pub fn new(
        flow: &'static str,
        machine: WizardMachine<F>,
        submission: Arc<dyn SubmissionPort<F>>,
        messages: ErrorMessages,
    ) -> Self {
        Self {
            flow,
            session: Mutex::new(WizardSession {
                machine,
                receipt: None,
            }),
            submission,
            messages,
        }
    }

    pub fn flow(&self) -> &'static str {
        self.flow
    }

    pub async fn snapshot(&self) -> WizardSnapshot<F> {
        self.session.lock().await.machine.snapshot()
    }

    pub async fn draft(&self) -> Draft<F> {
        self.session.lock().await.machine.draft().clone()
    }

    /// Receipt of the last successful submission.
    pub async fn receipt(&self) -> Option<SubmissionReceipt> {
        self.session.lock().await.receipt.clone()
    }

    /// Returns the dependents cleared by the cascade.
    pub async fn set_field(&self, field: F, value: impl Into<FieldValue>) -> Vec<F> {
        let cleared = self.session.lock().await.machine.set_field(field, value);
        if !cleared.is_empty() {
            debug!(flow = self.flow, field = field.key(), ?cleared, "dependent fields cleared");
        }
        cleared
    }

    pub async fn clear_field(&self, field: F) -> Vec<F> {
        self.session.lock().await.machine.clear_field(field)
    }

    /// Apply a batch of values, e.g. an address found by CEP.
    pub async fn apply_patch(&self, patch: Draft<F>) -> Vec<F> {
        self.session.lock().await.machine.merge(patch)
    }

    pub async fn reset(&self, seed: Option<Draft<F>>) -> WizardSnapshot<F> {
        let mut session = self.session.lock().await;
        session.machine.reset(seed);
        session.receipt = None;
        session.machine.snapshot()
    }

    pub async fn next(&self) -> WizardSnapshot<F> {
        self.dispatch(WizardEvent::Next).await
    }

    pub async fn previous(&self) -> WizardSnapshot<F> {
        self.dispatch(WizardEvent::Previous).await
    }

    pub async fn go_to(&self, step: usize) -> WizardSnapshot<F> {
        self.dispatch(WizardEvent::GoTo(step)).await
    }

    pub async fn submit(&self) -> WizardSnapshot<F> {
        self.dispatch(WizardEvent::Submit).await
    }

    pub async fn cancel(&self) -> WizardSnapshot<F> {
        self.dispatch(WizardEvent::Cancel).await
    }

    /// The session lock is held for the whole transition, submission call
    /// included, so a second submit waits and then finds the machine no
    /// longer editing.
    async fn dispatch(&self, event: WizardEvent) -> WizardSnapshot<F> {
        let mut session = self.session.lock().await;

        let span = info_span!("usecase.wizard.dispatch", flow = self.flow, event = ?event);
        async {
            let mut pending_events = vec![event];
            while let Some(event) = pending_events.pop() {
                let from = session.machine.status();
                let event_name = format!("{:?}", event);
                let actions = session.machine.handle(event);
                info!(
                    from = ?from,
                    to = ?session.machine.status(),
                    position = session.machine.position(),
                    event = %event_name,
                    "wizard transition"
                );
                pending_events.extend(self.execute_actions(&mut session, actions).await);
            }
            session.machine.snapshot()
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        session: &mut WizardSession<F>,
        actions: Vec<WizardAction<F>>,
    ) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            match action {
                WizardAction::Submit(draft) => {
                    debug!(flow = self.flow, fields = draft.len(), "submitting wizard");
                    match self.submission.submit(&draft).await {
                        Ok(receipt) => {
                            info!(
                                flow = self.flow,
                                resource = ?receipt.resource_id,
                                "submission accepted"
                            );
                            session.receipt = Some(receipt);
                            follow_up_events.push(WizardEvent::SubmissionSucceeded);
                        }
                        Err(err) => {
                            self.log_failure(&err);
                            follow_up_events.push(WizardEvent::SubmissionFailed {
                                message: self.messages.message_for(&err),
                            });
                        }
                    }
                }
            }
        }
        follow_up_events
    }

    fn log_failure(&self, err: &ApiError) {
        match err {
            ApiError::Timeout | ApiError::Network(_) | ApiError::Status { .. } => {
                warn!(flow = self.flow, error = %err, "submission rejected");
            }
            ApiError::Decode(_) | ApiError::InvalidPayload(_) | ApiError::Unexpected(_) => {
                error!(flow = self.flow, error = %err, "submission failed unexpectedly");
            }
        }
    }
}
