// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! API routes for plan queries.

use crate::error::Result;
use crate::models::Plan;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Plan query routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/plans/{clerk_id}", get(get_plans))
}

/// Plans for one user, newest first.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanListResponse {
    pub plans: Vec<Plan>,
}

/// List a user's plans, newest first.
async fn get_plans(
    State(state): State<Arc<AppState>>,
    Path(clerk_id): Path<String>,
) -> Result<Json<PlanListResponse>> {
    let plans = state.db.get_plans_for_user(&clerk_id).await?;
    Ok(Json(PlanListResponse { plans }))
}
