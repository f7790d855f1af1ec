//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore, synced from Clerk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Clerk user ID (also used as document ID)
    pub clerk_id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Display name (first + last)
    pub name: String,
    /// Profile picture URL
    pub image: Option<String>,
    /// When the user was first synced (ISO 8601)
    pub created_at: String,
    /// Last profile update (ISO 8601)
    pub updated_at: String,
}
