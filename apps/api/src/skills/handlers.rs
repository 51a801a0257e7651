//! Axum route handlers for the skill gap API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::parse_threshold;
use crate::errors::AppError;
use crate::models::student::SubjectScores;
use crate::skills::catalog::{CareerRequirements, SubjectSkills};
use crate::skills::gap::{compute_gap, profile, GapOutcome, StudentProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ThresholdQuery {
    pub threshold: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    /// Dataset row; defaults to the first student.
    #[serde(default)]
    pub row: usize,
    pub threshold: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GapQuery {
    pub career: Option<String>,
    #[serde(default)]
    pub row: usize,
    pub threshold: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GapResponse {
    pub row: usize,
    pub threshold: u8,
    #[serde(flatten)]
    pub outcome: GapOutcome,
    pub recommendation: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/subjects
pub async fn handle_list_subjects(State(state): State<AppState>) -> Json<Vec<SubjectSkills>> {
    Json(state.catalog.subject_table())
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerRequirements>> {
    Json(state.catalog.career_table())
}

/// GET /api/v1/students/:row/profile
///
/// Strong subjects and derived skills for one student, no career attached.
pub async fn handle_student_profile(
    State(state): State<AppState>,
    Path(row): Path<usize>,
    Query(params): Query<ThresholdQuery>,
) -> Result<Json<StudentProfile>, AppError> {
    let threshold = resolve_threshold(&state, params.threshold.as_deref())?;
    let record = state.dataset.record(row)?;
    Ok(Json(profile(&state.catalog, &record, threshold)))
}

/// GET /api/v1/recommend
///
/// Gap between the student's skills and the career they said they want.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> Result<Json<GapResponse>, AppError> {
    let threshold = resolve_threshold(&state, params.threshold.as_deref())?;
    let record = state.dataset.record(params.row)?;
    Ok(Json(gap_response(
        &state,
        params.row,
        &record.scores,
        &record.career_aspiration,
        threshold,
    )))
}

/// GET /api/v1/gap?career=
///
/// Gap between the student's skills and an arbitrary target career.
pub async fn handle_gap(
    State(state): State<AppState>,
    Query(params): Query<GapQuery>,
) -> Result<Json<GapResponse>, AppError> {
    let career = params
        .career
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Please enter a career aspiration".to_string()))?;

    let threshold = resolve_threshold(&state, params.threshold.as_deref())?;
    let record = state.dataset.record(params.row)?;
    Ok(Json(gap_response(&state, params.row, &record.scores, career, threshold)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn resolve_threshold(state: &AppState, raw: Option<&str>) -> Result<u8, AppError> {
    match raw {
        None => Ok(state.config.strong_threshold),
        Some(raw) => parse_threshold(raw).map_err(|e| AppError::Validation(format!("{e:#}"))),
    }
}

fn gap_response(
    state: &AppState,
    row: usize,
    scores: &SubjectScores,
    career: &str,
    threshold: u8,
) -> GapResponse {
    let outcome = compute_gap(&state.catalog, scores, career, threshold);
    if let GapOutcome::UnknownCareer(unknown) = &outcome {
        info!("Unknown career '{}' requested for row {row}", unknown.career);
    }
    let recommendation = outcome.recommendation();
    GapResponse {
        row,
        threshold,
        outcome,
        recommendation,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::dataset::StudentDataset;
    use crate::routes::build_router;
    use crate::skills::catalog::SkillCatalog;
    use crate::state::AppState;

    const CSV: &str = "\
career_aspiration,math_score,physics_score,chemistry_score,biology_score,english_score,geography_score,history_score
Data Scientist,80,60,90,50,85,40,30
Artist,10,20,30,40,50,60,70
Lawyer,80,60,,50,85,40,30
 ,80,60,90,50,85,40,30
";

    fn test_state() -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        AppState {
            catalog: Arc::new(SkillCatalog::builtin()),
            dataset: Arc::new(StudentDataset::from_reader(CSV.as_bytes()).unwrap()),
            config,
        }
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_recommend_defaults_to_first_row() {
        let (status, body) = get("/api/v1/recommend").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row"], 0);
        assert_eq!(body["threshold"], 75);
        assert_eq!(body["outcome"], "found");
        assert_eq!(body["career"], "data scientist");
        assert_eq!(body["missing_skills"], serde_json::json!(["analytical thinking"]));
    }

    #[tokio::test]
    async fn test_gap_for_explicit_career_and_row() {
        let (status, body) = get("/api/v1/gap?career=Artist&row=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strong_subjects"], serde_json::json!([]));
        assert_eq!(
            body["missing_skills"],
            serde_json::json!(["communication", "critical thinking"])
        );
    }

    #[tokio::test]
    async fn test_unknown_career_is_structured_ok() {
        let (status, body) = get("/api/v1/gap?career=astronaut").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "unknown_career");
        assert_eq!(body["known_careers"].as_array().unwrap().len(), 11);
        assert!(body["recommendation"]
            .as_str()
            .unwrap()
            .contains("not found in the system"));
    }

    #[tokio::test]
    async fn test_empty_career_is_rejected() {
        let (status, body) = get("/api/v1/gap?career=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please enter a career aspiration");
    }

    #[tokio::test]
    async fn test_threshold_override() {
        let (_, body) = get("/api/v1/gap?career=artist&row=1&threshold=70").await;
        assert_eq!(body["threshold"], 70);
        assert_eq!(body["strong_subjects"], serde_json::json!(["history"]));
        assert_eq!(body["missing_skills"], serde_json::json!(["communication"]));
    }

    #[tokio::test]
    async fn test_invalid_threshold_is_rejected() {
        let (status, _) = get("/api/v1/recommend?threshold=101").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_row_is_unprocessable() {
        let (status, body) = get("/api/v1/recommend?row=2").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "MALFORMED_RECORD");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("chemistry_score"));
    }

    #[tokio::test]
    async fn test_blank_aspiration_is_unprocessable() {
        let (status, body) = get("/api/v1/recommend?row=3").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "MALFORMED_RECORD");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("career_aspiration"));
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let (status, body) = get("/api/v1/students/42/profile").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_profile() {
        let (status, body) = get("/api/v1/students/0/profile").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["career_aspiration"], "data scientist");
        assert_eq!(
            body["strong_subjects"],
            serde_json::json!(["math", "chemistry", "english"])
        );
        assert_eq!(body["scores"]["chemistry"], 90);
    }

    #[tokio::test]
    async fn test_catalog_listings() {
        let (_, subjects) = get("/api/v1/subjects").await;
        assert_eq!(subjects.as_array().unwrap().len(), 7);
        assert_eq!(subjects[0]["subject"], "math");
        assert_eq!(subjects[0]["column"], "math_score");

        let (_, careers) = get("/api/v1/careers").await;
        assert_eq!(careers.as_array().unwrap().len(), 11);
        assert_eq!(careers[0]["career"], "analyst");
    }
}
