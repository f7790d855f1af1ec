// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! FlexCoach: AI-assisted fitness coaching backend
//!
//! This crate provides the backend API for syncing users from the identity
//! provider's webhooks and generating personalized workout and diet plans
//! with a generative-AI model.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::GeminiClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub gemini: GeminiClient,
}
