use serde::{Deserialize, Serialize};

/// Lifecycle fields the backend stamps on every catalog record.
///
/// Flattened into each aggregate, so the wire shape stays
/// `{ "ACTIVED": true, "REGUSER": "...", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(rename = "ACTIVED", default = "default_active")]
    pub is_active: bool,

    #[serde(rename = "DELETED", default)]
    pub is_deleted: bool,

    /// Who created the record
    #[serde(rename = "REGUSER", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// When the record was created (ISO string as sent by the backend)
    #[serde(rename = "REGDATE", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "MODUSER", default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,

    #[serde(rename = "MODDATE", default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl EntityMetadata {
    /// Best-effort "last touched" stamp for list columns
    pub fn last_change(&self) -> Option<&str> {
        self.modified_at
            .as_deref()
            .or(self.created_at.as_deref())
    }

    pub fn last_user(&self) -> Option<&str> {
        self.modified_by
            .as_deref()
            .or(self.created_by.as_deref())
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self {
            is_active: true,
            is_deleted: false,
            created_by: None,
            created_at: None,
            modified_by: None,
            modified_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_to_active() {
        let meta: EntityMetadata = serde_json::from_str("{}").unwrap();
        assert!(meta.is_active);
        assert!(!meta.is_deleted);
        assert_eq!(meta.last_change(), None);
    }

    #[test]
    fn test_last_change_prefers_modification() {
        let meta: EntityMetadata = serde_json::from_value(serde_json::json!({
            "ACTIVED": false,
            "REGUSER": "ana",
            "REGDATE": "2024-03-01T10:00:00Z",
            "MODUSER": "luis",
            "MODDATE": "2024-03-15T14:02:26Z"
        }))
        .unwrap();
        assert!(!meta.is_active);
        assert_eq!(meta.last_change(), Some("2024-03-15T14:02:26Z"));
        assert_eq!(meta.last_user(), Some("luis"));
    }
}
