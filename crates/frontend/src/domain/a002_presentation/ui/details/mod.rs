//! Presentation create/edit dialog.
//!
//! Edit mode diffs the presentation form against what was loaded; newly
//! attached files ride along in the update payload. Stored files are handled
//! by the files panel.

mod view;
mod view_model;

pub use view::PresentationDetails;
pub use view_model::PresentationDetailsVm;
