//! Step gate evaluator.
//!
//! Gates are evaluated against the live draft every time, never against a
//! snapshot taken when a step was left.

use crate::form::{Draft, FormField, ValidationErrors};

use super::StepDefinition;

/// Whether the step at `step` (1-based) has all required fields filled and
/// no validation errors. Unknown steps are never satisfied.
pub fn is_step_satisfied<F: FormField>(
    steps: &[StepDefinition<F>],
    step: usize,
    draft: &Draft<F>,
) -> bool {
    step_definition(steps, step).map_or(false, |def| def.errors(draft).is_empty())
}

/// `true` when every step before `target` is satisfied. Step 1 is always
/// reachable; targets outside `1..=steps.len()` never are.
pub fn can_reach<F: FormField>(
    steps: &[StepDefinition<F>],
    target: usize,
    draft: &Draft<F>,
) -> bool {
    if target == 0 || target > steps.len() {
        return false;
    }
    (1..target).all(|step| is_step_satisfied(steps, step, draft))
}

/// First step whose gate is closed, if any.
pub fn first_unsatisfied<F: FormField>(
    steps: &[StepDefinition<F>],
    draft: &Draft<F>,
) -> Option<usize> {
    (1..=steps.len()).find(|step| !is_step_satisfied(steps, *step, draft))
}

/// Errors of every step merged together (used on submit).
pub fn all_errors<F: FormField>(
    steps: &[StepDefinition<F>],
    draft: &Draft<F>,
) -> ValidationErrors<F> {
    let mut errors = ValidationErrors::new();
    for step in steps {
        errors.extend(step.errors(draft));
    }
    errors
}

pub(crate) fn step_definition<F: FormField>(
    steps: &[StepDefinition<F>],
    step: usize,
) -> Option<&StepDefinition<F>> {
    step.checked_sub(1).and_then(|offset| steps.get(offset))
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
            Notes => "notes",
        }
    }

    fn contact(draft: &Draft<PetField>) -> ValidationErrors<PetField> {
        let mut check = FieldCheck::new(draft);
        check.email(PetField::Email);
        check.finish()
    }

    static STEPS: [StepDefinition<PetField>; 3] = [
        StepDefinition {
            index: 1,
            title: "name",
            required: &[PetField::Name],
            validate: no_checks,
        },
        StepDefinition {
            index: 2,
            title: "contact",
            required: &[PetField::Email],
            validate: contact,
        },
        StepDefinition {
            index: 3,
            title: "review",
            required: &[],
            validate: no_checks,
        },
    ];

    #[test]
    fn step_one_is_always_reachable() {
        assert!(can_reach(&STEPS, 1, &Draft::new()));
    }

    #[test]
    fn empty_draft_blocks_step_two() {
        let draft = Draft::new();
        assert!(!can_reach(&STEPS, 2, &draft));

        let draft = draft.with(PetField::Name, "Rex");
        assert!(can_reach(&STEPS, 2, &draft));
    }

    #[test]
    fn later_step_values_do_not_open_earlier_gates() {
        let draft = Draft::new()
            .with(PetField::Email, "rex@abrigo.org")
            .with(PetField::Notes, "x");
        assert!(!can_reach(&STEPS, 3, &draft));
    }

    #[test]
    fn invalid_value_closes_gate_even_when_filled() {
        let draft = Draft::new()
            .with(PetField::Name, "Rex")
            .with(PetField::Email, "not-an-email");
        assert!(!is_step_satisfied(&STEPS, 2, &draft));
        assert!(!can_reach(&STEPS, 3, &draft));
        assert_eq!(first_unsatisfied(&STEPS, &draft), Some(2));
    }

    #[test]
    fn review_step_is_vacuously_satisfied() {
        assert!(is_step_satisfied(&STEPS, 3, &Draft::new()));
    }

    #[test]
    fn out_of_range_targets_are_unreachable() {
        let draft = Draft::new().with(PetField::Name, "Rex");
        assert!(!can_reach(&STEPS, 0, &draft));
        assert!(!can_reach(&STEPS, 4, &draft));
    }
}
