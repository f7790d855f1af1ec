// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Workout and diet plan models.
//!
//! `WorkoutPlan` and `DietPlan` are the validated shapes produced from raw
//! model output; `Plan` is the record persisted to Firestore.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single routine within a workout day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Routine {
    pub name: String,
    pub sets: i64,
    pub reps: i64,
}

/// Routines planned for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseDay {
    pub day: String,
    pub routines: Vec<Routine>,
}

/// Validated workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutPlan {
    /// Ordered day names the user trains on
    pub schedule: Vec<String>,
    pub exercises: Vec<ExerciseDay>,
}

/// A meal with its foods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meal {
    pub name: String,
    pub foods: Vec<String>,
}

/// Validated diet plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DietPlan {
    /// Daily calorie target. Passed through from the model without coercion,
    /// so a non-numeric value survives as-is.
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub daily_calories: serde_json::Value,
    pub meals: Vec<Meal>,
}

/// Stored plan record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Plan {
    /// Plan document ID
    pub plan_id: String,
    /// Clerk user ID (owner)
    pub user_id: String,
    /// Display name ("{goal} Plan - {date}")
    pub name: String,
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
    /// Whether this is the user's active plan
    pub is_active: bool,
    /// When this plan was created (ISO 8601)
    pub created_at: String,
}
