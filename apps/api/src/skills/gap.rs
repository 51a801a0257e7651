//! Skill gap engine.
//!
//! Pipeline per request:
//! 1. strong subjects: every mapped subject with score >= threshold
//! 2. current skills: union of the strong subjects' skills
//! 3. required skills: career lookup in the catalog (may miss)
//! 4. missing skills: required - current
//!
//! Pure and synchronous. All tables come in through `SkillCatalog`.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::student::{StudentRecord, SubjectScores};
use crate::models::subject::Subject;
use crate::skills::catalog::{normalize_career, CareerLookup, SkillCatalog};

pub const DEFAULT_STRONG_THRESHOLD: u8 = 75;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapResult {
    pub career: String,
    pub strong_subjects: Vec<Subject>,
    pub current_skills: BTreeSet<String>,
    /// In catalog order.
    pub required_skills: Vec<String>,
    pub missing_skills: BTreeSet<String>,
}

/// The target career is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownCareer {
    pub career: String,
    pub known_careers: Vec<String>,
}

impl fmt::Display for UnknownCareer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Career '{}' not found in the system. Try: {}",
            self.career,
            self.known_careers.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GapOutcome {
    Found(GapResult),
    UnknownCareer(UnknownCareer),
}

impl GapOutcome {
    pub fn recommendation(&self) -> String {
        match self {
            GapOutcome::Found(result) => build_recommendation(result),
            GapOutcome::UnknownCareer(unknown) => unknown.to_string(),
        }
    }
}

/// A student's strengths without reference to any career.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub row: usize,
    pub career_aspiration: String,
    pub threshold: u8,
    pub scores: SubjectScores,
    pub strong_subjects: Vec<Subject>,
    pub current_skills: BTreeSet<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine steps
// ────────────────────────────────────────────────────────────────────────────

/// Mapped subjects scoring at or above `threshold`, in declaration order.
pub fn strong_subjects(
    catalog: &SkillCatalog,
    scores: &SubjectScores,
    threshold: u8,
) -> Vec<Subject> {
    catalog
        .subjects()
        .filter(|subject| scores.get(*subject) >= threshold)
        .collect()
}

/// Deduplicated union of the skills each subject unlocks.
pub fn derive_skills(catalog: &SkillCatalog, subjects: &[Subject]) -> BTreeSet<String> {
    subjects
        .iter()
        .flat_map(|subject| catalog.skills_for(*subject))
        .cloned()
        .collect()
}

/// `required - current`.
pub fn missing_skills<'a>(
    required: impl IntoIterator<Item = &'a String>,
    current: &BTreeSet<String>,
) -> BTreeSet<String> {
    required
        .into_iter()
        .filter(|skill| !current.contains(*skill))
        .cloned()
        .collect()
}

/// Runs the whole pipeline for one student against `target_career`.
pub fn compute_gap(
    catalog: &SkillCatalog,
    scores: &SubjectScores,
    target_career: &str,
    threshold: u8,
) -> GapOutcome {
    let career = normalize_career(target_career);
    let strong = strong_subjects(catalog, scores, threshold);
    let current = derive_skills(catalog, &strong);

    let required = match catalog.lookup_career(&career) {
        CareerLookup::Found(required) => required,
        CareerLookup::Unknown => {
            debug!(career = %career, "career not in catalog");
            return GapOutcome::UnknownCareer(UnknownCareer {
                career,
                known_careers: catalog.known_careers(),
            });
        }
    };

    let missing = missing_skills(required, &current);
    debug!(
        career = %career,
        strong = strong.len(),
        current = current.len(),
        missing = missing.len(),
        "computed skill gap"
    );

    GapOutcome::Found(GapResult {
        career,
        strong_subjects: strong,
        current_skills: current,
        required_skills: required.to_vec(),
        missing_skills: missing,
    })
}

pub fn profile(catalog: &SkillCatalog, record: &StudentRecord, threshold: u8) -> StudentProfile {
    let strong = strong_subjects(catalog, &record.scores, threshold);
    let current_skills = derive_skills(catalog, &strong);
    StudentProfile {
        row: record.row,
        career_aspiration: normalize_career(&record.career_aspiration),
        threshold,
        scores: record.scores.clone(),
        strong_subjects: strong,
        current_skills,
    }
}

/// Human-readable next step for a found career.
pub fn build_recommendation(result: &GapResult) -> String {
    if result.missing_skills.is_empty() {
        return format!(
            "You already have the required foundational skills for {}!",
            result.career
        );
    }
    let missing: Vec<&str> = result.missing_skills.iter().map(String::as_str).collect();
    format!(
        "Skills to learn next for {}: {}.",
        result.career,
        missing.join(", ")
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
