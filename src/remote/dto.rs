use serde::{Deserialize, Serialize};

use crate::models::{NewTaskRequest, Role, Solution, Task, UpdateTaskRequest, User};

#[derive(Debug, Deserialize)]
pub struct TasksEnvelope {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct TaskEnvelope {
    pub task: Task,
}

#[derive(Debug, Deserialize)]
pub struct SolutionsEnvelope {
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Deserialize)]
pub struct SolutionEnvelope {
    pub solution: Solution,
}

#[derive(Debug, Deserialize)]
pub struct AuthEnvelope {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: String,
}

/// The auth endpoint multiplexes login/register through one POST body.
#[derive(Debug, Serialize)]
pub struct AuthRequestBody {
    pub action: &'static str,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskBody {
    #[serde(flatten)]
    pub task: NewTaskRequest,
    pub created_by: i64,
}

#[derive(Debug, Serialize)]
pub struct UpdateTaskBody {
    pub id: i64,
    #[serde(flatten)]
    pub fields: UpdateTaskRequest,
}

#[derive(Debug, Serialize)]
pub struct SubmitSolutionBody {
    pub student_id: i64,
    pub task_id: i64,
    pub solution_text: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewSolutionBody {
    pub id: i64,
    pub is_correct: bool,
    pub points_earned: i32,
    pub teacher_comment: String,
    pub checked_by: i64,
}
