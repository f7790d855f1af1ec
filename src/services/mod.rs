// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Services module - business logic layer.

pub mod gemini;
pub mod plan;
pub mod signature;

pub use gemini::{GeminiClient, GenerationConfig};
pub use plan::{GeneratedPlans, UserProfile};
pub use signature::WebhookVerifier;
