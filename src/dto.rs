//! # Wellness API: Request/Response DTOs
//!
//! Bodies for the auth, streak and probe routes. Record routes take and
//! return the models directly, wrapped in a single-key envelope.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Validation is expressed via `validator` derive macros

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::IdentityUser;
use crate::services::streak::DayCell;

// ============================================================================
// Common
// ============================================================================

/// Acknowledgement returned by deletes, whether or not anything was removed.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// POST /login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response for signup and GET /user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: IdentityUser,
}

// ============================================================================
// Streaks
// ============================================================================

/// GET /habits/:id/streak
#[derive(Debug, Deserialize, Validate)]
pub struct StreakQuery {
    /// The viewer's local calendar date. Defaults to today in UTC.
    pub today: Option<NaiveDate>,

    #[validate(range(min = 1, max = 366, message = "days must be 1-366"))]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub habit_id: String,
    pub current_streak: u32,
    pub completed_today: bool,
    pub total_completions: usize,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak: StreakSummary,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyzResponse {
    pub status: &'static str,
    pub checks: ReadyzChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyzChecks {
    pub store: &'static str,
}
