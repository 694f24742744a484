pub mod attachment_picker;
pub mod confirm_dialog;
pub mod message_strip;
pub mod sortable_header;
pub mod status_switch;
pub mod table_checkbox;

pub use attachment_picker::AttachmentPicker;
pub use confirm_dialog::{open_confirm, ConfirmAction, ConfirmRequest};
pub use message_strip::{MessageKind, MessageStrip};
pub use sortable_header::SortableHeaderCell;
pub use status_switch::{StatusSwitch, ToggleAction};
pub use table_checkbox::{TableCheckbox, TableHeaderCheckbox};
