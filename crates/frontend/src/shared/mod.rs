pub mod api_utils;
pub mod attachments;
pub mod bulk;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod edit_session;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod page_frame;
pub mod task;
