// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles synced from Clerk)
//! - Plans (generated workout/diet plans)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DietPlan, Plan, User, WorkoutPlan};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their Clerk ID.
    pub async fn get_user(&self, clerk_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(clerk_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a user synced from the identity provider.
    pub async fn sync_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.clerk_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Update a user's profile fields, preserving `created_at`.
    ///
    /// Fetch-modify-write; falls back to creating the record if the
    /// `user.created` delivery was missed.
    pub async fn update_user(
        &self,
        clerk_id: &str,
        email: Option<String>,
        name: String,
        image: Option<String>,
    ) -> Result<(), AppError> {
        let now = chrono::Utc::now().to_rfc3339();

        let user = match self.get_user(clerk_id).await? {
            Some(mut existing) => {
                existing.email = email;
                existing.name = name;
                existing.image = image;
                existing.updated_at = now;
                existing
            }
            None => {
                tracing::warn!(clerk_id, "Update for unknown user, creating record");
                User {
                    clerk_id: clerk_id.to_string(),
                    email,
                    name,
                    image,
                    created_at: now.clone(),
                    updated_at: now,
                }
            }
        };

        self.sync_user(&user).await
    }

    // ─── Plan Operations ─────────────────────────────────────────

    /// Create a plan and return its document ID.
    ///
    /// When the new plan is active, the user's previously active plans are
    /// deactivated first so at most one plan stays active per user.
    pub async fn create_plan(
        &self,
        user_id: &str,
        diet_plan: DietPlan,
        workout_plan: WorkoutPlan,
        is_active: bool,
        name: String,
    ) -> Result<String, AppError> {
        if is_active {
            self.deactivate_plans(user_id).await?;
        }

        let now = chrono::Utc::now();
        let plan = Plan {
            plan_id: format!("{}-{}", user_id, now.timestamp_millis()),
            user_id: user_id.to_string(),
            name,
            workout_plan,
            diet_plan,
            is_active,
            created_at: now.to_rfc3339(),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PLANS)
            .document_id(&plan.plan_id)
            .object(&plan)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(plan.plan_id)
    }

    /// Get all plans for a user, newest first.
    pub async fn get_plans_for_user(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PLANS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark all of a user's currently-active plans inactive.
    ///
    /// Uses concurrent writes with a limit to avoid overloading Firestore.
    async fn deactivate_plans(&self, user_id: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        let owner = user_id.to_string();

        let active: Vec<Plan> = client
            .fluent()
            .select()
            .from(collections::PLANS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(owner.clone()),
                    q.field("is_active").eq(true),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if active.is_empty() {
            return Ok(());
        }

        tracing::debug!(user_id, count = active.len(), "Deactivating previous plans");

        stream::iter(active)
            .map(|mut plan| async move {
                plan.is_active = false;

                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::PLANS)
                    .document_id(&plan.plan_id)
                    .object(&plan)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(())
    }
}
