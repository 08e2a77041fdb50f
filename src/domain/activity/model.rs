//! Activity log domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account action recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    AddressSaved,
    AddressUpdated,
    AddressDeleted,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressSaved => "address_saved",
            Self::AddressUpdated => "address_updated",
            Self::AddressDeleted => "address_deleted",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit record owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub user_id: String,
    pub action: ActivityAction,
    pub details: Option<String>,
    /// Serialized JSON object
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        for action in [
            ActivityAction::AddressSaved,
            ActivityAction::AddressUpdated,
            ActivityAction::AddressDeleted,
        ] {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json, action.as_str());
        }
    }
}
