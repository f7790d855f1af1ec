// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Plan generation endpoint driven by the AI model.

use crate::error::AppError;
use crate::models::plan::{DietPlan, WorkoutPlan};
use crate::services::plan::{self, UserProfile};
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Plan generation routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/vapi/generate-program", post(generate_program))
}

/// Success payload for a generated program.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeneratedProgram {
    pub plan_id: String,
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
}

/// Envelope returned by the generate-program endpoint.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgramResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<GeneratedProgram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generate a workout + diet plan for a profile and persist it.
///
/// Always answers with the `{success, ...}` envelope: 200 with data, or
/// 500 with the error message on any failure. Failure kinds are not
/// distinguished beyond the message.
async fn generate_program(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> (StatusCode, Json<ProgramResponse>) {
    match run(&state, &profile).await {
        Ok(program) => (
            StatusCode::OK,
            Json(ProgramResponse {
                success: true,
                data: Some(program),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id = %profile.user_id, "Plan generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProgramResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Generation pipeline: two AI calls, validation, then persistence.
async fn run(state: &AppState, profile: &UserProfile) -> Result<GeneratedProgram, AppError> {
    let plans = plan::generate_plans(&state.gemini, profile).await?;

    let name = format!(
        "{} Plan - {}",
        profile.fitness_goal,
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let plan_id = state
        .db
        .create_plan(
            &profile.user_id,
            plans.diet_plan.clone(),
            plans.workout_plan.clone(),
            true,
            name,
        )
        .await?;

    tracing::info!(plan_id = %plan_id, user_id = %profile.user_id, "Plan created");

    Ok(GeneratedProgram {
        plan_id,
        workout_plan: plans.workout_plan,
        diet_plan: plans.diet_plan,
    })
}
