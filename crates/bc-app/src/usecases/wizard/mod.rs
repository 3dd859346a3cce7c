mod orchestrator;

use std::sync::Arc;

use bc_core::error::ErrorMessages;
use bc_core::form::{Draft, FormField};
use bc_core::ports::SubmissionPort;
use bc_core::wizard::{StepDefinition, StepTableError, WizardMachine};

pub use orchestrator::WizardOrchestrator;

/// Wire a step table, a seed and its submission adapter into an orchestrator.
pub fn build_wizard<F: FormField>(
    flow: &'static str,
    steps: &'static [StepDefinition<F>],
    seed: Draft<F>,
    submission: Arc<dyn SubmissionPort<F>>,
    messages: ErrorMessages,
) -> Result<WizardOrchestrator<F>, StepTableError> {
    let machine = WizardMachine::new(steps, seed)?;
    Ok(WizardOrchestrator::new(flow, machine, submission, messages))
}
