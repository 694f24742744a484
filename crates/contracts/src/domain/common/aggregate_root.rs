use super::EntityMetadata;

/// Root of a catalog aggregate
///
/// Ties a record to its CRUD endpoint and its UI labels.
pub trait AggregateRoot {
    // ============================================================================
    // Instance data
    // ============================================================================

    /// Business key as stored by the backend (SKUID, CATID, IDLISTAOK, ...)
    fn key(&self) -> &str;

    /// Human-readable name for lists and confirmations
    fn display_name(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn is_active(&self) -> bool {
        self.metadata().is_active
    }

    // ============================================================================
    // Aggregate class metadata
    // ============================================================================

    /// Index in the system, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// CRUD endpoint path relative to the API base URL
    fn endpoint() -> &'static str;

    /// Query parameter that addresses a single record
    fn key_param() -> &'static str;

    /// Singular UI label
    fn element_name() -> &'static str;

    /// Plural UI label
    fn list_name() -> &'static str;
}
