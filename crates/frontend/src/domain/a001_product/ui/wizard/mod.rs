//! Product creation wizard.
//!
//! Three steps, each guarded: product data, presentations (at least one),
//! review. Everything is sent in a single composite request at the end, so
//! nothing reaches the backend until the user confirms.

mod state;
mod view;
mod view_model;

pub use state::{WizardState, WizardStep};
pub use view::ProductWizard;
pub use view_model::ProductWizardVm;
