//! Step-gated multi-step wizard.
//!
//! * [`StepDefinition`] - static step table entry
//! * [`gate`] - reachability of steps against the live draft
//! * [`WizardMachine`] - position, navigation and submission state

pub mod gate;
mod machine;
mod step;

pub use gate::{all_errors, can_reach, first_unsatisfied, is_step_satisfied};
pub use machine::{WizardAction, WizardEvent, WizardMachine, WizardSnapshot, WizardStatus};
pub use step::{check_step_table, no_checks, StepDefinition, StepTableError};
