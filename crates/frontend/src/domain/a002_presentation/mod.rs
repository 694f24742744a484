pub mod api;
pub mod draft;
pub mod ui;
