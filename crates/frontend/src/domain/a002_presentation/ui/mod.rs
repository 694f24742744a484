pub mod details;
pub mod draft_editor;
pub mod list;

pub use draft_editor::PresentationDraftEditor;
