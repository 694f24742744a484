use serde::{Deserialize, Serialize};

/// Operation selector sent as the `ProcessType` query parameter.
///
/// Every CRUD surface of the backend is a single POST endpoint; this value
/// picks which operation it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    GetAll,
    GetOne,
    #[serde(rename = "GetBySKUID")]
    GetBySkuId,
    AddOne,
    UpdateOne,
    DeleteLogic,
    DeleteHard,
    ActivateOne,
}

impl ProcessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::GetAll => "GetAll",
            ProcessType::GetOne => "GetOne",
            ProcessType::GetBySkuId => "GetBySKUID",
            ProcessType::AddOne => "AddOne",
            ProcessType::UpdateOne => "UpdateOne",
            ProcessType::DeleteLogic => "DeleteLogic",
            ProcessType::DeleteHard => "DeleteHard",
            ProcessType::ActivateOne => "ActivateOne",
        }
    }

    /// Operations that change backend state
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            ProcessType::GetAll | ProcessType::GetOne | ProcessType::GetBySkuId
        )
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for pt in [
            ProcessType::GetAll,
            ProcessType::GetOne,
            ProcessType::GetBySkuId,
            ProcessType::AddOne,
            ProcessType::UpdateOne,
            ProcessType::DeleteLogic,
            ProcessType::DeleteHard,
            ProcessType::ActivateOne,
        ] {
            let json = serde_json::to_value(pt).unwrap();
            assert_eq!(json, serde_json::Value::String(pt.as_str().to_string()));
        }
    }

    #[test]
    fn test_reads_are_not_mutations() {
        assert!(!ProcessType::GetBySkuId.is_mutation());
        assert!(ProcessType::DeleteLogic.is_mutation());
    }
}
