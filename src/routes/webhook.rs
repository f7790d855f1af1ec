// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Webhook route for Clerk user events.
//!
//! Clerk delivers signed events via Svix. The handler verifies the
//! signature before parsing, dispatches `user.created` / `user.updated`
//! to persistence, and acknowledges everything else so the provider can
//! add event kinds without breaking us.

use crate::error::AppError;
use crate::models::webhook::WebhookEvent;
use crate::models::User;
use crate::services::signature::WebhookVerifier;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/clerk-webhook", post(handle_event))
}

/// Handle a signed Clerk webhook delivery (POST).
async fn handle_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let event = match verify_and_parse(&state, &headers, &body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting webhook delivery");
            return match e {
                AppError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid body"),
                AppError::MissingHeaders => (StatusCode::BAD_REQUEST, "Missing headers"),
                AppError::InvalidSignature => (StatusCode::BAD_REQUEST, "Invalid signature"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Webhook secret not configured",
                ),
            };
        }
    };

    match event {
        WebhookEvent::UserCreated(data) => {
            tracing::info!(clerk_id = %data.id, "Webhook verified: user.created");

            let now = chrono::Utc::now().to_rfc3339();
            let user = User {
                clerk_id: data.id.clone(),
                email: data.primary_email().map(str::to_string),
                name: data.display_name(),
                image: data.image_url.clone(),
                created_at: now.clone(),
                updated_at: now,
            };

            if let Err(e) = state.db.sync_user(&user).await {
                tracing::error!(error = %e, clerk_id = %data.id, "Failed to sync user");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to sync user");
            }
            tracing::info!(clerk_id = %data.id, "User synced to DB");
        }
        WebhookEvent::UserUpdated(data) => {
            tracing::info!(clerk_id = %data.id, "Webhook verified: user.updated");

            let result = state
                .db
                .update_user(
                    &data.id,
                    data.primary_email().map(str::to_string),
                    data.display_name(),
                    data.image_url.clone(),
                )
                .await;

            if let Err(e) = result {
                tracing::error!(error = %e, clerk_id = %data.id, "Failed to update user");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update user");
            }
            tracing::info!(clerk_id = %data.id, "User updated in DB");
        }
        WebhookEvent::Unknown => {
            // Forward compatibility: acknowledge kinds we don't handle.
            tracing::debug!("Ignoring unhandled webhook event type");
        }
    }

    (StatusCode::OK, "Webhook processed")
}

/// Check secret, body, headers, and signature, then parse the event.
///
/// Checks run in contract order: unreadable body, then missing headers,
/// then signature. A verified body that still fails to parse as an event
/// envelope counts as an invalid body.
fn verify_and_parse(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<WebhookEvent, AppError> {
    let secret = state
        .config
        .clerk_webhook_secret
        .as_deref()
        .ok_or(AppError::Config("CLERK_WEBHOOK_SECRET"))?;

    let body_text = std::str::from_utf8(body).map_err(|_| AppError::InvalidBody)?;

    let svix_id = header_str(headers, "svix-id");
    let svix_timestamp = header_str(headers, "svix-timestamp");
    let svix_signature = header_str(headers, "svix-signature");

    let (Some(svix_id), Some(svix_timestamp), Some(svix_signature)) =
        (svix_id, svix_timestamp, svix_signature)
    else {
        return Err(AppError::MissingHeaders);
    };

    WebhookVerifier::new(secret)?.verify(body_text, svix_id, svix_timestamp, svix_signature)?;

    serde_json::from_str(body_text).map_err(|e| {
        tracing::error!(error = %e, "Verified webhook payload is not a valid event");
        AppError::InvalidBody
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
