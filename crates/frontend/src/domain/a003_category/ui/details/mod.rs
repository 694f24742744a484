//! Category dialog (MVVM)
//!
//! - view_model.rs: CategoryDetailsVm, edit session and commands
//! - view.rs: CategoryDetails component

mod view;
mod view_model;

pub use view::CategoryDetails;
pub use view_model::CategoryDetailsVm;
