//! Skill catalog: the two lookup tables the gap engine runs on.
//!
//! `SubjectSkillMap`: subject → skills unlocked by being strong in it.
//! `CareerSkillMap`: normalized career name → required skills.
//!
//! Built once at startup and shared read-only through `AppState`. Tests build
//! synthetic catalogs with `SkillCatalog::new`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::subject::Subject;

const BUILTIN_SUBJECT_SKILLS: &[(Subject, &[&str])] = &[
    (Subject::Math, &["problem solving", "statistics"]),
    (Subject::Physics, &["analytical thinking"]),
    (Subject::Chemistry, &["data analysis"]),
    (Subject::Biology, &["research skills"]),
    (Subject::English, &["communication"]),
    (Subject::Geography, &["data interpretation"]),
    (Subject::History, &["critical thinking"]),
];

const BUILTIN_CAREER_SKILLS: &[(&str, &[&str])] = &[
    (
        "data scientist",
        &[
            "statistics",
            "data analysis",
            "problem solving",
            "analytical thinking",
            "communication",
        ],
    ),
    (
        "software engineer",
        &["problem solving", "analytical thinking", "critical thinking"],
    ),
    (
        "analyst",
        &["data analysis", "data interpretation", "communication"],
    ),
    (
        "researcher",
        &["research skills", "analytical thinking", "communication"],
    ),
    (
        "doctor",
        &[
            "research skills",
            "analytical thinking",
            "communication",
            "data analysis",
        ],
    ),
    (
        "lawyer",
        &["critical thinking", "communication", "data interpretation"],
    ),
    (
        "teacher",
        &["communication", "critical thinking", "research skills"],
    ),
    (
        "scientist",
        &[
            "research skills",
            "analytical thinking",
            "data analysis",
            "problem solving",
        ],
    ),
    (
        "business owner",
        &[
            "problem solving",
            "communication",
            "data interpretation",
            "analytical thinking",
        ],
    ),
    (
        "government officer",
        &[
            "data interpretation",
            "communication",
            "critical thinking",
            "analytical thinking",
        ],
    ),
    ("artist", &["critical thinking", "communication"]),
];

/// Result of looking a career up in the catalog.
///
/// `Found(&[])` (a career with no requirements) and `Unknown` (a career the
/// catalog has never heard of) are different answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerLookup<'a> {
    Found(&'a [String]),
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectSkills {
    pub subject: Subject,
    pub column: &'static str,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerRequirements {
    pub career: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    subject_skills: BTreeMap<Subject, Vec<String>>,
    career_skills: BTreeMap<String, Vec<String>>,
}

/// Trims and lower-cases a career name into its catalog key.
pub fn normalize_career(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SkillCatalog {
    /// Builds a catalog from arbitrary tables. Career keys are normalized;
    /// a repeated key keeps the last requirement list.
    pub fn new<S, C, K>(subject_skills: S, career_skills: C) -> Self
    where
        S: IntoIterator<Item = (Subject, Vec<String>)>,
        C: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        Self {
            subject_skills: subject_skills.into_iter().collect(),
            career_skills: career_skills
                .into_iter()
                .map(|(career, skills)| (normalize_career(career.as_ref()), skills))
                .collect(),
        }
    }

    /// The built-in tables: 7 subjects, 11 careers.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_SUBJECT_SKILLS
                .iter()
                .map(|(subject, skills)| (*subject, to_owned_list(skills))),
            BUILTIN_CAREER_SKILLS
                .iter()
                .map(|(career, skills)| (*career, to_owned_list(skills))),
        )
    }

    /// Subjects with a skill mapping, in declaration order.
    pub fn subjects(&self) -> impl Iterator<Item = Subject> + '_ {
        self.subject_skills.keys().copied()
    }

    /// Skills unlocked by `subject`; empty when the subject is unmapped.
    pub fn skills_for(&self, subject: Subject) -> &[String] {
        self.subject_skills
            .get(&subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lookup_career(&self, career: &str) -> CareerLookup<'_> {
        match self.career_skills.get(&normalize_career(career)) {
            Some(skills) => CareerLookup::Found(skills),
            None => CareerLookup::Unknown,
        }
    }

    /// Every recognized career, sorted.
    pub fn known_careers(&self) -> Vec<String> {
        self.career_skills.keys().cloned().collect()
    }

    pub fn career_count(&self) -> usize {
        self.career_skills.len()
    }

    pub fn subject_table(&self) -> Vec<SubjectSkills> {
        self.subject_skills
            .iter()
            .map(|(subject, skills)| SubjectSkills {
                subject: *subject,
                column: subject.column(),
                skills: skills.clone(),
            })
            .collect()
    }

    pub fn career_table(&self) -> Vec<CareerRequirements> {
        self.career_skills
            .iter()
            .map(|(career, skills)| CareerRequirements {
                career: career.clone(),
                required_skills: skills.clone(),
            })
            .collect()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
