//! Wizard controller state machine.
//!
//! Pure and synchronous: the machine never performs I/O. Submitting yields a
//! [`WizardAction::Submit`] carrying the draft; whoever runs the action feeds
//! the outcome back as [`WizardEvent::SubmissionSucceeded`] or
//! [`WizardEvent::SubmissionFailed`].

use serde::Serialize;

use crate::form::{Draft, FieldValue, FormField, ValidationErrors};

use super::gate::{self, step_definition};
use super::step::{check_step_table, StepDefinition, StepTableError};

/// Lifecycle of one wizard session.
///
/// Estado da sessão do assistente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WizardStatus {
    Editing,
    /// Submission action handed out, waiting for its outcome.
    Submitting,
    Submitted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Previous,
    GoTo(usize),
    Submit,
    SubmissionSucceeded,
    SubmissionFailed { message: String },
    Cancel,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction<F: FormField> {
    Submit(Draft<F>),
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot<F: FormField> {
    pub position: usize,
    pub step_count: usize,
    pub step_title: &'static str,
    pub status: WizardStatus,
    pub errors: ValidationErrors<F>,
    pub banner: Option<String>,
    /// `reachable[i]` tells whether step `i + 1` can be jumped to.
    pub reachable: Vec<bool>,
}

pub struct WizardMachine<F: FormField + 'static> {
    steps: &'static [StepDefinition<F>],
    position: usize,
    status: WizardStatus,
    draft: Draft<F>,
    errors: ValidationErrors<F>,
    banner: Option<String>,
}

impl<F: FormField> WizardMachine<F> {
    pub fn new(
        steps: &'static [StepDefinition<F>],
        seed: Draft<F>,
    ) -> Result<Self, StepTableError> {
        check_step_table(steps)?;
        Ok(Self {
            steps,
            position: 1,
            status: WizardStatus::Editing,
            draft: seed,
            errors: ValidationErrors::new(),
            banner: None,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn draft(&self) -> &Draft<F> {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors<F> {
        &self.errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn steps(&self) -> &'static [StepDefinition<F>] {
        self.steps
    }

    pub fn is_final_step(&self) -> bool {
        self.position == self.steps.len()
    }

    pub fn can_reach(&self, step: usize) -> bool {
        gate::can_reach(self.steps, step, &self.draft)
    }

    pub fn snapshot(&self) -> WizardSnapshot<F> {
        let step_title = step_definition(self.steps, self.position)
            .map(|step| step.title)
            .unwrap_or_default();
        WizardSnapshot {
            position: self.position,
            step_count: self.steps.len(),
            step_title,
            status: self.status,
            errors: self.errors.clone(),
            banner: self.banner.clone(),
            reachable: (1..=self.steps.len()).map(|s| self.can_reach(s)).collect(),
        }
    }

    /// Write a field while editing. Returns the dependents cleared by the
    /// cascade; ignored outside [`WizardStatus::Editing`].
    pub fn set_field(&mut self, field: F, value: impl Into<FieldValue>) -> Vec<F> {
        if self.status != WizardStatus::Editing {
            return Vec::new();
        }
        let cleared = self.draft.set(field, value);
        self.refresh_errors();
        cleared
    }

    pub fn clear_field(&mut self, field: F) -> Vec<F> {
        if self.status != WizardStatus::Editing {
            return Vec::new();
        }
        let cleared = self.draft.clear(field);
        self.refresh_errors();
        cleared
    }

    pub fn merge(&mut self, partial: Draft<F>) -> Vec<F> {
        if self.status != WizardStatus::Editing {
            return Vec::new();
        }
        let cleared = self.draft.merge(partial);
        self.refresh_errors();
        cleared
    }

    /// Start a fresh session on step 1.
    pub fn reset(&mut self, seed: Option<Draft<F>>) {
        self.draft.reset(seed);
        self.position = 1;
        self.status = WizardStatus::Editing;
        self.errors = ValidationErrors::new();
        self.banner = None;
    }

    pub fn next(&mut self) -> bool {
        let before = self.position;
        self.handle(WizardEvent::Next);
        self.position != before
    }

    pub fn previous(&mut self) -> bool {
        let before = self.position;
        self.handle(WizardEvent::Previous);
        self.position != before
    }

    pub fn go_to(&mut self, step: usize) -> bool {
        let before = self.position;
        self.handle(WizardEvent::GoTo(step));
        self.position != before
    }

    /// Returns the draft to submit when full validation passes.
    pub fn submit(&mut self) -> Option<Draft<F>> {
        self.handle(WizardEvent::Submit)
            .into_iter()
            .map(|action| match action {
                WizardAction::Submit(draft) => draft,
            })
            .next()
    }

    pub fn cancel(&mut self) {
        self.handle(WizardEvent::Cancel);
    }

    pub fn handle(&mut self, event: WizardEvent) -> Vec<WizardAction<F>> {
        match (self.status, event) {
            (WizardStatus::Editing, WizardEvent::Next) => {
                let current = self.current_step();
                let errors = current.errors(&self.draft);
                if errors.is_empty() {
                    self.errors = ValidationErrors::new();
                    self.position = (self.position + 1).min(self.steps.len());
                } else {
                    self.errors = errors;
                }
                Vec::new()
            }
            (WizardStatus::Editing, WizardEvent::Previous) => {
                if self.position > 1 {
                    self.position -= 1;
                    self.errors = ValidationErrors::new();
                }
                Vec::new()
            }
            (WizardStatus::Editing, WizardEvent::GoTo(step)) => {
                if step != self.position && self.can_reach(step) {
                    self.position = step;
                    self.errors = ValidationErrors::new();
                }
                Vec::new()
            }
            (WizardStatus::Editing, WizardEvent::Submit) => {
                if !self.is_final_step() {
                    return Vec::new();
                }
                let errors = gate::all_errors(self.steps, &self.draft);
                if !errors.is_empty() {
                    self.errors = errors;
                    return Vec::new();
                }
                self.errors = ValidationErrors::new();
                self.banner = None;
                self.status = WizardStatus::Submitting;
                vec![WizardAction::Submit(self.draft.clone())]
            }
            (WizardStatus::Editing, WizardEvent::Cancel) => {
                self.draft.reset(None);
                self.errors = ValidationErrors::new();
                self.banner = None;
                self.status = WizardStatus::Cancelled;
                Vec::new()
            }
            (WizardStatus::Submitting, WizardEvent::SubmissionSucceeded) => {
                self.draft.reset(None);
                self.status = WizardStatus::Submitted;
                Vec::new()
            }
            (WizardStatus::Submitting, WizardEvent::SubmissionFailed { message }) => {
                self.banner = Some(message);
                self.status = WizardStatus::Editing;
                Vec::new()
            }
            (_, _) => Vec::new(),
        }
    }

    fn current_step(&self) -> &'static StepDefinition<F> {
        // position is kept within 1..=steps.len() by every transition
        &self.steps[self.position - 1]
    }

    /// Re-run validation for fields that already show an error so fixed
    /// fields clear immediately and untouched ones stay quiet. Every step is
    /// checked: a failed submit flags fields of earlier steps while the
    /// position stays on the final one.
    fn refresh_errors(&mut self) {
        if self.errors.is_empty() {
            return;
        }
        let flagged: Vec<F> = self.errors.fields().collect();
        let mut fresh = gate::all_errors(self.steps, &self.draft);
        fresh.retain(|field| flagged.contains(&field));
        self.errors = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldCheck;
    use crate::wizard::step::no_checks;

    crate::form_fields! {
        enum PetField {
            Name => "name",
            Email => "email",
            Password => "password",
            ConfirmPassword => "confirm_password",
        }
    }

    fn account(draft: &Draft<PetField>) -> ValidationErrors<PetField> {
        let mut check = FieldCheck::new(draft);
        check
            .email(PetField::Email)
            .password(PetField::Password)
            .matches(PetField::ConfirmPassword, PetField::Password);
        check.finish()
    }

    static STEPS: [StepDefinition<PetField>; 3] = [
        StepDefinition {
            index: 1,
            title: "Pet",
            required: &[PetField::Name],
            validate: no_checks,
        },
        StepDefinition {
            index: 2,
            title: "Conta",
            required: &[PetField::Email, PetField::Password, PetField::ConfirmPassword],
            validate: account,
        },
        StepDefinition {
            index: 3,
            title: "Revisão",
            required: &[],
            validate: no_checks,
        },
    ];

    fn filled() -> Draft<PetField> {
        Draft::new()
            .with(PetField::Name, "Rex")
            .with(PetField::Email, "rex@abrigo.org")
            .with(PetField::Password, "abc123")
            .with(PetField::ConfirmPassword, "abc123")
    }

    #[test]
    fn next_is_gated_by_current_step() {
        let mut wizard = WizardMachine::new(&STEPS, Draft::new()).unwrap();

        assert!(!wizard.can_reach(2));
        assert!(!wizard.next());
        assert_eq!(wizard.position(), 1);
        assert!(wizard.errors().contains(PetField::Name));

        wizard.set_field(PetField::Name, "Rex");
        assert!(wizard.errors().is_empty(), "fixed field clears its error");
        assert!(wizard.can_reach(2));
        assert!(wizard.next());
        assert_eq!(wizard.position(), 2);
    }

    #[test]
    fn previous_always_allowed_above_step_one() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        assert!(!wizard.previous());
        wizard.next();
        assert!(wizard.previous());
        assert_eq!(wizard.position(), 1);
    }

    #[test]
    fn go_to_unreachable_step_is_silently_ignored() {
        let mut wizard = WizardMachine::new(&STEPS, Draft::new()).unwrap();
        assert!(!wizard.go_to(3));
        assert_eq!(wizard.position(), 1);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn fixing_an_earlier_field_unlocks_later_steps() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        assert!(wizard.go_to(3));
        wizard.previous();
        wizard.previous();
        wizard.set_field(PetField::Name, "");
        assert!(!wizard.can_reach(3));
        wizard.set_field(PetField::Name, "Thor");
        assert!(wizard.go_to(3));
    }

    #[test]
    fn submit_only_from_final_step() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        assert!(wizard.submit().is_none());
        assert_eq!(wizard.status(), WizardStatus::Editing);
    }

    #[test]
    fn submit_validates_all_steps_and_keeps_position() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        assert!(wizard.go_to(3));
        wizard.set_field(PetField::ConfirmPassword, "abc124");

        assert!(wizard.submit().is_none());
        assert_eq!(wizard.position(), 3);
        assert_eq!(wizard.status(), WizardStatus::Editing);
        assert!(wizard.errors().contains(PetField::ConfirmPassword));
    }

    #[test]
    fn submit_errors_of_earlier_steps_clear_when_fixed() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        assert!(wizard.go_to(3));
        wizard.set_field(PetField::Email, "rex@");
        wizard.set_field(PetField::ConfirmPassword, "abc124");
        assert!(wizard.submit().is_none());
        assert_eq!(wizard.errors().len(), 2);

        wizard.set_field(PetField::ConfirmPassword, "abc123");
        assert!(!wizard.errors().contains(PetField::ConfirmPassword));
        assert!(wizard.errors().contains(PetField::Email), "unfixed field keeps its error");
        assert_eq!(wizard.position(), 3);

        wizard.set_field(PetField::Email, "rex@abrigo.org");
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn submission_outcomes() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        wizard.go_to(3);
        let draft = wizard.submit().expect("valid draft is submitted");
        assert_eq!(draft, filled());
        assert_eq!(wizard.status(), WizardStatus::Submitting);

        // no navigation while a submission is in flight
        assert!(!wizard.previous());
        assert!(wizard.submit().is_none());

        wizard.handle(WizardEvent::SubmissionFailed {
            message: "Erro".into(),
        });
        assert_eq!(wizard.status(), WizardStatus::Editing);
        assert_eq!(wizard.banner(), Some("Erro"));
        assert_eq!(wizard.draft(), &filled(), "draft kept for retry");

        wizard.submit().expect("retry");
        wizard.handle(WizardEvent::SubmissionSucceeded);
        assert_eq!(wizard.status(), WizardStatus::Submitted);
        assert!(wizard.draft().is_empty());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut wizard = WizardMachine::new(&STEPS, filled()).unwrap();
        wizard.cancel();
        assert_eq!(wizard.status(), WizardStatus::Cancelled);
        assert!(wizard.draft().is_empty());
        assert!(wizard.set_field(PetField::Name, "x").is_empty());
        assert!(wizard.draft().is_empty());
    }

    #[test]
    fn snapshot_reports_reachability() {
        let wizard = WizardMachine::new(&STEPS, Draft::new().with(PetField::Name, "Rex")).unwrap();
        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.reachable, vec![true, true, false]);
        assert_eq!(snapshot.step_title, "Pet");
    }

    #[test]
    fn empty_step_table_is_rejected() {
        static NONE: [StepDefinition<PetField>; 0] = [];
        assert!(matches!(
            WizardMachine::new(&NONE, Draft::new()),
            Err(StepTableError::Empty)
        ));
    }
}
