// src/models/vote.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An election opened by a teacher (`votingSessions.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSession {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A candidate standing in one session (`candidates.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub session_id: String,
    pub name: String,
}

/// A cast ballot (`votes.json`). At most one per (session, student).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub session_id: String,
    pub candidate_id: String,
    pub student_username: String,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTally {
    pub candidate: String,
    pub votes: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Session title is required"))]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCandidateRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing sessionId or name"))]
    pub session_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Missing sessionId or name"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing vote info"))]
    pub session_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing vote info"))]
    pub candidate_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Missing vote info"))]
    pub student_username: String,
}
