pub mod files_panel;

pub use files_panel::FilesPanel;
