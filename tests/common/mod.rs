// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

use flexcoach::config::Config;
use flexcoach::db::FirestoreDb;
use flexcoach::routes::create_router;
use flexcoach::services::{GeminiClient, WebhookVerifier};
use flexcoach::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection (emulator).
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
///
/// The Gemini client points at an unroutable local port, so AI calls fail
/// fast with a transport error.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(test_db_offline(), "http://127.0.0.1:9".to_string())
}

/// Create a test app with an explicit database and Gemini endpoint.
#[allow(dead_code)]
pub fn create_test_app_with(
    db: FirestoreDb,
    gemini_base_url: String,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let gemini = GeminiClient::with_base_url(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        gemini_base_url,
    );

    let state = Arc::new(AppState { config, db, gemini });

    (create_router(state.clone()), state)
}

/// Sign a webhook body with the test secret, the way the provider would.
#[allow(dead_code)]
pub fn sign_webhook(body: &str, msg_id: &str, timestamp: &str) -> String {
    let secret = Config::test_default()
        .clerk_webhook_secret
        .expect("test config has a webhook secret");

    WebhookVerifier::new(&secret)
        .unwrap()
        .sign_entry(msg_id, timestamp, body)
        .unwrap()
}
