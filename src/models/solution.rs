use serde::{Deserialize, Serialize};

use super::task::{Grade, Subject};

/// A submitted solution. Listing endpoints join task/student context onto
/// the row; create/review responses return a partial record, hence the
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub id: i64,
    pub student_id: i64,
    pub task_id: i64,
    #[serde(default)]
    pub solution_text: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub points_earned: i32,
    #[serde(default)]
    pub teacher_comment: Option<String>,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub checked_at: Option<String>,

    // Joined columns, present on listings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Solution {
    pub fn is_checked(&self) -> bool {
        self.checked_at.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSolutionRequest {
    pub task_id: i64,
    pub solution_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSolutionRequest {
    pub is_correct: bool,
    pub points_earned: i32,
    pub teacher_comment: String,
}
