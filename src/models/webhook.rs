// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Clerk webhook event payloads.

use serde::Deserialize;

/// An email address entry on a Clerk user record.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

/// User payload carried by `user.created` / `user.updated` events.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserEventData {
    /// First and last name joined with a space, trimmed.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// First email address, if the provider shared any.
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses.first().map(|e| e.email_address.as_str())
    }
}

/// Verified webhook event, tagged by Clerk event type.
///
/// The `Unknown` arm keeps the union open: event kinds Clerk adds later
/// deserialize there and are ignored rather than rejected.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WebhookEvent {
    #[serde(rename = "user.created")]
    UserCreated(UserEventData),
    #[serde(rename = "user.updated")]
    UserUpdated(UserEventData),
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_and_trims() {
        let data: UserEventData = serde_json::from_value(serde_json::json!({
            "id": "user_123",
            "first_name": "Ann",
            "last_name": "Lee",
            "email_addresses": [{"email_address": "ann@x.com"}]
        }))
        .unwrap();

        assert_eq!(data.display_name(), "Ann Lee");
        assert_eq!(data.primary_email(), Some("ann@x.com"));
    }

    #[test]
    fn test_display_name_with_missing_last_name() {
        let data: UserEventData = serde_json::from_value(serde_json::json!({
            "id": "user_123",
            "first_name": "Ann"
        }))
        .unwrap();

        assert_eq!(data.display_name(), "Ann");
        assert_eq!(data.primary_email(), None);
    }

    #[test]
    fn test_unknown_event_kind_parses_to_open_arm() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"type": "organization.created", "data": {"id": "org_1"}}"#,
        )
        .unwrap();

        assert!(matches!(event, WebhookEvent::Unknown));
    }

    #[test]
    fn test_user_created_event_parses() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"type": "user.created", "data": {"id": "user_9", "image_url": "https://img.clerk.com/u9.png"}}"#,
        )
        .unwrap();

        match event {
            WebhookEvent::UserCreated(data) => {
                assert_eq!(data.id, "user_9");
                assert_eq!(data.image_url.as_deref(), Some("https://img.clerk.com/u9.png"));
            }
            other => panic!("expected user.created, got {:?}", other),
        }
    }
}
