use std::sync::Arc;

use serde::Serialize;

use crate::db::Session;
use crate::error::AppError;
use crate::models::{Role, Solution};
use crate::remote::RemoteApi;

/// Assembles the role-specific dashboard from the solutions feed. The
/// upstream returns listings newest-first, so "recent" is a plain prefix.
pub struct DashboardService {
    remote: Arc<dyn RemoteApi>,
}

const RECENT_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardSummary {
    Student(StudentSummary),
    Teacher(TeacherSummary),
}

#[derive(Debug, Serialize)]
pub struct StudentSummary {
    pub solved: usize,
    pub attempted: usize,
    pub total_points: i64,
    pub recent: Vec<Solution>,
}

#[derive(Debug, Serialize)]
pub struct TeacherSummary {
    pub checked: usize,
    pub pending: usize,
    pub recent: Vec<Solution>,
}

impl DashboardService {
    pub fn new(remote: Arc<dyn RemoteApi>) -> Self {
        Self { remote }
    }

    pub async fn summary_for(&self, session: &Session) -> Result<DashboardSummary, AppError> {
        match session.role {
            Role::Student => self
                .student_summary(session.user_id)
                .await
                .map(DashboardSummary::Student),
            Role::Teacher => self.teacher_summary().await.map(DashboardSummary::Teacher),
        }
    }

    async fn student_summary(&self, student_id: i64) -> Result<StudentSummary, AppError> {
        let solutions = self.remote.solutions_by_student(student_id).await?;

        let solved = solutions
            .iter()
            .filter(|solution| solution.is_correct == Some(true))
            .count();
        let total_points = solutions
            .iter()
            .map(|solution| i64::from(solution.points_earned))
            .sum();
        let attempted = solutions.len();
        let recent = solutions.into_iter().take(RECENT_LIMIT).collect();

        Ok(StudentSummary {
            solved,
            attempted,
            total_points,
            recent,
        })
    }

    async fn teacher_summary(&self) -> Result<TeacherSummary, AppError> {
        let solutions = self.remote.recent_solutions().await?;

        let checked = solutions
            .iter()
            .filter(|solution| solution.is_checked())
            .count();
        let pending = solutions.len() - checked;
        let recent = solutions.into_iter().take(RECENT_LIMIT).collect();

        Ok(TeacherSummary {
            checked,
            pending,
            recent,
        })
    }
}
