// src/handlers/vote.rs

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::vote::{
        AddCandidateRequest, Candidate, CandidateTally, CastVoteRequest, CreateSessionRequest,
        Vote, VoteSession,
    },
    store::Stores,
    utils::{
        clock,
        extract::{AppJson, AppPath},
        html::required_text,
    },
};

/// Counts votes per candidate of one session.
///
/// Both slices must already be filtered to the session. Candidates without
/// votes appear with a count of zero; votes for unknown candidate ids are
/// ignored.
fn tally(candidates: &[Candidate], votes: &[Vote]) -> Vec<CandidateTally> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for vote in votes {
        *counts.entry(vote.candidate_id.as_str()).or_default() += 1;
    }

    candidates
        .iter()
        .map(|c| CandidateTally {
            candidate: c.name.clone(),
            votes: counts.get(c.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Opens a new voting session.
pub async fn create_session(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let title = required_text(&payload.title, "Session title is required")?;

    let session = VoteSession {
        id: clock::unique_millis().to_string(),
        title,
        created_at: Utc::now(),
    };

    stores.sessions.append(session.clone()).await?;
    tracing::info!("Voting session '{}' created ({})", session.title, session.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Session created", "session": session })),
    ))
}

pub async fn list_sessions(State(stores): State<Arc<Stores>>) -> Result<impl IntoResponse, AppError> {
    let sessions = stores.sessions.load().await?;
    Ok(Json(sessions))
}

/// Adds a candidate to a session. Sessions are matched by id string only.
pub async fn add_candidate(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<AddCandidateRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let name = required_text(&payload.name, "Missing sessionId or name")?;

    let candidate = Candidate {
        id: clock::unique_millis().to_string(),
        session_id: payload.session_id,
        name,
    };

    stores.candidates.append(candidate.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Candidate added", "candidate": candidate })),
    ))
}

pub async fn list_candidates(
    State(stores): State<Arc<Stores>>,
    AppPath(session_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut candidates = stores.candidates.load().await?;
    candidates.retain(|c| c.session_id == session_id);
    Ok(Json(candidates))
}

/// Removes a candidate from a session.
pub async fn delete_candidate(
    State(stores): State<Arc<Stores>>,
    AppPath((id, session_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    stores
        .candidates
        .update(|items| {
            let before = items.len();
            items.retain(|c| !(c.id == id && c.session_id == session_id));
            if items.len() == before {
                return Err(AppError::NotFound(
                    "Candidate not found in session".to_string(),
                ));
            }
            Ok(())
        })
        .await?;

    Ok(Json(json!({ "success": true, "message": "Candidate deleted" })))
}

/// Casts a ballot. A student gets one vote per session; the check and the
/// insert happen under the votes file lock.
pub async fn cast_vote(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CastVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    stores
        .votes
        .update(|votes| {
            let already_voted = votes.iter().any(|v| {
                v.session_id == payload.session_id
                    && v.student_username == payload.student_username
            });
            if already_voted {
                tracing::warn!(
                    "Duplicate vote by '{}' in session {}",
                    payload.student_username,
                    payload.session_id
                );
                return Err(AppError::Conflict(
                    "You already voted in this session".to_string(),
                ));
            }

            votes.push(Vote {
                id: clock::unique_millis().to_string(),
                session_id: payload.session_id.clone(),
                candidate_id: payload.candidate_id.clone(),
                student_username: payload.student_username.clone(),
            });
            Ok(())
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Vote submitted" })),
    ))
}

/// Vote count per candidate of a session.
pub async fn results(
    State(stores): State<Arc<Stores>>,
    AppPath(session_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut candidates = stores.candidates.load().await?;
    candidates.retain(|c| c.session_id == session_id);

    let mut votes = stores.votes.load().await?;
    votes.retain(|v| v.session_id == session_id);

    Ok(Json(tally(&candidates, &votes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, name: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            session_id: "s1".to_string(),
            name: name.to_string(),
        }
    }

    fn vote(candidate_id: &str, student: &str) -> Vote {
        Vote {
            id: format!("v-{student}"),
            session_id: "s1".to_string(),
            candidate_id: candidate_id.to_string(),
            student_username: student.to_string(),
        }
    }

    #[test]
    fn tally_groups_by_candidate_id() {
        let candidates = [candidate("1", "Asha"), candidate("2", "Ravi")];
        let votes = [vote("1", "a"), vote("2", "b"), vote("1", "c")];

        let results = tally(&candidates, &votes);
        assert_eq!(
            results,
            vec![
                CandidateTally { candidate: "Asha".into(), votes: 2 },
                CandidateTally { candidate: "Ravi".into(), votes: 1 },
            ]
        );
    }

    #[test]
    fn tally_reports_zero_and_ignores_unknown_candidates() {
        let candidates = [candidate("1", "Asha")];
        let votes = [vote("9", "a")];

        let results = tally(&candidates, &votes);
        assert_eq!(results, vec![CandidateTally { candidate: "Asha".into(), votes: 0 }]);
    }
}
