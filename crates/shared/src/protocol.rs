use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GuestId, GuestStatus};

/// Body of `POST /update-guest-address/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAddressRequest {
    pub address: String,
}

/// Response of both guest update endpoints.
///
/// Failures may omit `success` entirely and only carry `error`, so every field
/// is optional on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<GuestStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusUpdateResponse {
    pub fn ok(new_status: GuestStatus) -> Self {
        Self {
            success: true,
            new_status: Some(new_status),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// One guest as exported for the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSnapshot {
    pub id: GuestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_profile: Option<String>,
    #[serde(default)]
    pub status: GuestStatus,
    /// Overrides the link derived from `facebook_profile`. An empty string
    /// means the card has no messaging link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messenger_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    #[serde(default)]
    pub guests: Vec<GuestSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_only_body_parses_as_failure() {
        let parsed: StatusUpdateResponse =
            serde_json::from_str(r#"{"error": "Invalid action"}"#).expect("parse");
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("Invalid action"));
        assert_eq!(parsed.new_status, None);
    }

    #[test]
    fn success_body_carries_status_and_address() {
        let parsed: StatusUpdateResponse = serde_json::from_str(
            r#"{"success": true, "new_address": "1 Elm St", "new_status": "has_address"}"#,
        )
        .expect("parse");
        assert!(parsed.success);
        assert_eq!(parsed.new_status, Some(GuestStatus::HasAddress));
        assert_eq!(parsed.new_address.as_deref(), Some("1 Elm St"));
    }

    #[test]
    fn snapshot_fills_defaults_for_sparse_guests() {
        let snapshot: ReviewSnapshot =
            serde_json::from_str(r#"{"guests": [{"id": 3, "name": "Ada Lovelace"}]}"#)
                .expect("parse");
        let guest = &snapshot.guests[0];
        assert_eq!(guest.id, GuestId(3));
        assert_eq!(guest.status, GuestStatus::NeedsAddress);
        assert_eq!(guest.address, None);
        assert_eq!(guest.messenger_link, None);
    }
}
