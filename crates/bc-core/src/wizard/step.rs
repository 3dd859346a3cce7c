use thiserror::Error;

use crate::form::{Draft, FormField, ValidationErrors, Validator};

/// Static description of one wizard step.
pub struct StepDefinition<F: FormField + 'static> {
    /// 1-based position of the step.
    pub index: usize,
    pub title: &'static str,
    pub required: &'static [F],
    pub validate: Validator<F>,
}

impl<F: FormField> std::fmt::Debug for StepDefinition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("index", &self.index)
            .field("title", &self.title)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl<F: FormField> StepDefinition<F> {
    /// Errors for this step: missing required fields plus validator output.
    pub fn errors(&self, draft: &Draft<F>) -> ValidationErrors<F> {
        let mut errors = (self.validate)(draft);
        for field in self.required {
            if draft.is_blank(*field) {
                errors.insert(*field, crate::form::MSG_REQUIRED);
            }
        }
        errors
    }
}

/// Validator for steps that check nothing (review pages).
pub fn no_checks<F: FormField>(_draft: &Draft<F>) -> ValidationErrors<F> {
    ValidationErrors::new()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepTableError {
    #[error("wizard needs at least one step")]
    Empty,
    #[error("step at position {position} declares index {index}")]
    OutOfOrder { position: usize, index: usize },
}

/// Steps must be numbered `1..=n` in order.
pub fn check_step_table<F: FormField>(steps: &[StepDefinition<F>]) -> Result<(), StepTableError> {
    if steps.is_empty() {
        return Err(StepTableError::Empty);
    }
    for (offset, step) in steps.iter().enumerate() {
        let position = offset + 1;
        if step.index != position {
            return Err(StepTableError::OutOfOrder {
                position,
                index: step.index,
            });
        }
    }
    Ok(())
}
