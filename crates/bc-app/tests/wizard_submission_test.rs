use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bc_app::usecases::{build_wizard, WizardOrchestrator};
use bc_core::error::{ApiError, ErrorMessages};
use bc_core::flows::user_signup::{self, UserSignupField};
use bc_core::form::Draft;
use bc_core::ports::{SubmissionPort, SubmissionReceipt};
use bc_core::wizard::WizardStatus;

/// Records every draft it receives and answers with queued outcomes.
struct RecordingSubmission {
    calls: AtomicUsize,
    outcomes: Mutex<Vec<Result<SubmissionReceipt, ApiError>>>,
}

impl RecordingSubmission {
    fn new(outcomes: Vec<Result<SubmissionReceipt, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionPort<UserSignupField> for RecordingSubmission {
    async fn submit(
        &self,
        draft: &Draft<UserSignupField>,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(user_signup::to_signup(draft).is_ok());
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop()
            .unwrap_or_else(|| Err(ApiError::Unexpected("no outcome queued".into())))
    }
}

fn wizard(submission: Arc<RecordingSubmission>) -> WizardOrchestrator<UserSignupField> {
    build_wizard(
        "user_signup",
        &user_signup::STEPS,
        Draft::new(),
        submission,
        ErrorMessages::default().with_override(409, "E-mail já cadastrado."),
    )
    .expect("valid step table")
}

async fn fill(wizard: &WizardOrchestrator<UserSignupField>, confirmation: &str) {
    wizard.set_field(UserSignupField::Name, "João Silva").await;
    wizard.set_field(UserSignupField::Email, "joao@example.com").await;
    wizard.set_field(UserSignupField::Cpf, "529.982.247-25").await;
    wizard.set_field(UserSignupField::Phone, "(11) 98765-4321").await;
    wizard.set_field(UserSignupField::Password, "abc123").await;
    wizard
        .set_field(UserSignupField::ConfirmPassword, confirmation)
        .await;
    wizard.set_field(UserSignupField::AcceptTerms, true).await;
}

#[tokio::test]
async fn mismatched_confirmation_never_reaches_the_adapter() {
    let submission = RecordingSubmission::new(vec![]);
    let wizard = wizard(submission.clone());
    fill(&wizard, "abc124").await;

    let snapshot = wizard.submit().await;
    assert_eq!(snapshot.status, WizardStatus::Editing);
    assert!(snapshot.errors.contains(UserSignupField::ConfirmPassword));
    assert_eq!(submission.calls(), 0);
}

#[tokio::test]
async fn rejected_submission_keeps_draft_for_retry() {
    let submission = RecordingSubmission::new(vec![
        Err(ApiError::Status {
            code: 409,
            message: Some("email taken".into()),
        }),
        Ok(SubmissionReceipt::for_resource("u1", "ok")),
    ]);
    let wizard = wizard(submission.clone());
    fill(&wizard, "abc123").await;

    let snapshot = wizard.submit().await;
    assert_eq!(snapshot.status, WizardStatus::Editing);
    assert_eq!(snapshot.banner.as_deref(), Some("E-mail já cadastrado."));
    assert_eq!(snapshot.position, 1);
    assert_eq!(
        wizard.draft().await.text(UserSignupField::Email),
        Some("joao@example.com")
    );

    let snapshot = wizard.submit().await;
    assert_eq!(snapshot.status, WizardStatus::Submitted);
    assert_eq!(snapshot.banner, None);
    assert!(wizard.draft().await.is_empty());
    assert_eq!(submission.calls(), 2);
}

#[tokio::test]
async fn concurrent_submits_call_the_adapter_once() {
    let submission = RecordingSubmission::new(vec![Ok(SubmissionReceipt::default())]);
    let wizard = Arc::new(wizard(submission.clone()));
    fill(&wizard, "abc123").await;

    let (a, b) = tokio::join!(wizard.submit(), wizard.submit());
    assert_eq!(a.status, WizardStatus::Submitted);
    assert_eq!(b.status, WizardStatus::Submitted);
    assert_eq!(submission.calls(), 1);
}

#[tokio::test]
async fn timeout_maps_to_transport_banner() {
    let submission = RecordingSubmission::new(vec![Err(ApiError::Timeout)]);
    let wizard = wizard(submission);
    fill(&wizard, "abc123").await;

    let snapshot = wizard.submit().await;
    assert_eq!(
        snapshot.banner.as_deref(),
        Some(bc_core::error::TIMEOUT_MESSAGE)
    );
}
