use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUBJECT_COUNT: usize = 7;

/// The fixed set of academic subjects scored in the dataset.
///
/// Declaration order doubles as the reporting order, so `Ord` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    Biology,
    English,
    Geography,
    History,
}

impl Subject {
    pub const ALL: [Subject; SUBJECT_COUNT] = [
        Subject::Math,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::English,
        Subject::Geography,
        Subject::History,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::English => "english",
            Subject::Geography => "geography",
            Subject::History => "history",
        }
    }

    /// Name of the CSV column holding this subject's score.
    pub fn column(&self) -> &'static str {
        match self {
            Subject::Math => "math_score",
            Subject::Physics => "physics_score",
            Subject::Chemistry => "chemistry_score",
            Subject::Biology => "biology_score",
            Subject::English => "english_score",
            Subject::Geography => "geography_score",
            Subject::History => "history_score",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
