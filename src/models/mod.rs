// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Data models for the application.

pub mod plan;
pub mod user;
pub mod webhook;

pub use plan::{DietPlan, ExerciseDay, Meal, Plan, Routine, WorkoutPlan};
pub use user::User;
pub use webhook::WebhookEvent;
