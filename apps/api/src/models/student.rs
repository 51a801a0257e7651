use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::models::subject::{Subject, SUBJECT_COUNT};

pub const CAREER_ASPIRATION_COLUMN: &str = "career_aspiration";
pub const MAX_SCORE: u8 = 100;

/// Data-integrity faults found while turning a dataset row into a record.
/// A record that fails here is never scored; no default is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field '{column}'")]
    MissingField { column: String },

    #[error("field '{column}' is not an integer score: '{value}'")]
    NonNumeric { column: String, value: String },

    #[error("field '{column}' is out of range 0..=100: {value}")]
    OutOfRange { column: String, value: i64 },
}

/// One score per subject, each in `0..=100`. Always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectScores([u8; SUBJECT_COUNT]);

impl SubjectScores {
    /// Builds scores from `(subject, score)` pairs. Every subject must appear.
    pub fn new(pairs: impl IntoIterator<Item = (Subject, u8)>) -> Result<Self, RecordError> {
        let mut slots: [Option<u8>; SUBJECT_COUNT] = [None; SUBJECT_COUNT];
        for (subject, score) in pairs {
            if score > MAX_SCORE {
                return Err(RecordError::OutOfRange {
                    column: subject.column().to_string(),
                    value: i64::from(score),
                });
            }
            slots[subject as usize] = Some(score);
        }

        let mut scores = [0u8; SUBJECT_COUNT];
        for subject in Subject::ALL {
            scores[subject as usize] = slots[subject as usize].ok_or_else(|| {
                RecordError::MissingField {
                    column: subject.column().to_string(),
                }
            })?;
        }
        Ok(Self(scores))
    }

    /// Reads every `<subject>_score` field through `field`.
    pub fn from_fields<'a>(
        field: impl Fn(&str) -> Option<&'a str>,
    ) -> Result<Self, RecordError> {
        let mut pairs = Vec::with_capacity(SUBJECT_COUNT);
        for subject in Subject::ALL {
            let column = subject.column();
            let raw = field(column).ok_or_else(|| RecordError::MissingField {
                column: column.to_string(),
            })?;
            pairs.push((subject, parse_score(column, raw)?));
        }
        Self::new(pairs)
    }

    pub fn get(&self, subject: Subject) -> u8 {
        self.0[subject as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, u8)> + '_ {
        Subject::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

impl Serialize for SubjectScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(s, score)| (s.as_str(), score)))
    }
}

fn parse_score(column: &str, raw: &str) -> Result<u8, RecordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordError::MissingField {
            column: column.to_string(),
        });
    }
    let value: i64 = trimmed.parse().map_err(|_| RecordError::NonNumeric {
        column: column.to_string(),
        value: trimmed.to_string(),
    })?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_SCORE)
        .ok_or_else(|| RecordError::OutOfRange {
            column: column.to_string(),
            value,
        })
}

/// A validated student row.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub row: usize,
    pub career_aspiration: String,
    pub scores: SubjectScores,
}

impl StudentRecord {
    pub fn from_fields<'a>(
        row: usize,
        field: impl Fn(&str) -> Option<&'a str>,
    ) -> Result<Self, RecordError> {
        let career_aspiration = field(CAREER_ASPIRATION_COLUMN)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| RecordError::MissingField {
                column: CAREER_ASPIRATION_COLUMN.to_string(),
            })?
            .to_string();
        let scores = SubjectScores::from_fields(field)?;
        Ok(Self {
            row,
            career_aspiration,
            scores,
        })
    }
}
