use serde::{Deserialize, Serialize};

/// Школьный класс. Upstream speaks plain numbers, so the enum converts
/// through `u8` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    Eight,
    Nine,
}

impl Grade {
    pub fn number(self) -> u8 {
        match self {
            Grade::Eight => 8,
            Grade::Nine => 9,
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Grade::Eight),
            9 => Ok(Grade::Nine),
            other => Err(format!("unsupported grade: {}", other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> u8 {
        grade.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Algebra,
    Geometry,
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Algebra => "algebra",
            Subject::Geometry => "geometry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A practice task as the tasks endpoint returns it. Timestamps arrive as
/// opaque strings and are kept that way; update responses omit `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub grade: Grade,
    pub subject: Subject,
    pub chapter_id: i32,
    pub chapter_title: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskRequest {
    pub grade: Grade,
    pub subject: Subject,
    pub chapter_id: i32,
    pub chapter_title: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

/// The tasks endpoint only rewrites these columns on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}
