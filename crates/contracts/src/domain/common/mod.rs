//! Common types and traits for all catalog aggregates

pub mod aggregate_root;
pub mod changes;
pub mod entity_metadata;
pub mod envelope;
pub mod lenient;
pub mod process_type;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use changes::{changed_fields, normalize_value, ChangeSet};
pub use entity_metadata::EntityMetadata;
pub use envelope::{decode_list, decode_one, server_message, DecodeError};
pub use process_type::ProcessType;
