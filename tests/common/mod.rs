use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use matempraktika::error::AppError;
use matempraktika::models::{
    Difficulty, Grade, NewTaskRequest, RegisterRequest, ReviewSolutionRequest, Role, Solution,
    Subject, SubmitSolutionRequest, Task, UpdateTaskRequest, User,
};
use matempraktika::remote::{AuthSuccess, RemoteApi, TaskFilter};
use matempraktika::{AppState, router};

pub const STUB_TOKEN: &str = "stub-token";

/// Canned remote backend: one known account, a fixed task/solution feed,
/// and an optional hard failure on task fetches.
#[derive(Default)]
pub struct StubRemoteApi {
    pub account: Option<(String, String, User)>,
    pub tasks: Vec<Task>,
    pub solutions: Vec<Solution>,
    pub fail_tasks: bool,
}

impl StubRemoteApi {
    pub fn with_account(mut self, email: &str, password: &str, user: User) -> Self {
        self.account = Some((email.to_string(), password.to_string(), user));
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_solutions(mut self, solutions: Vec<Solution>) -> Self {
        self.solutions = solutions;
        self
    }

    pub fn failing_tasks(mut self) -> Self {
        self.fail_tasks = true;
        self
    }
}

#[async_trait]
impl RemoteApi for StubRemoteApi {
    async fn fetch_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        if self.fail_tasks {
            return Err(AppError::Upstream {
                status: 500,
                message: "stub failure".to_string(),
            });
        }

        Ok(self
            .tasks
            .iter()
            .filter(|task| filter.grade.is_none_or(|grade| task.grade == grade))
            .filter(|task| filter.subject.is_none_or(|subject| task.subject == subject))
            .filter(|task| filter.chapter_id.is_none_or(|id| task.chapter_id == id))
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: NewTaskRequest, _created_by: i64) -> Result<Task, AppError> {
        Ok(Task {
            id: 900,
            grade: task.grade,
            subject: task.subject,
            chapter_id: task.chapter_id,
            chapter_title: task.chapter_title,
            title: task.title,
            description: task.description,
            difficulty: task.difficulty,
            points: task.points,
            external_link: task.external_link,
            created_at: "2025-01-01 00:00:00".to_string(),
        })
    }

    async fn update_task(&self, id: i64, fields: UpdateTaskRequest) -> Result<Task, AppError> {
        let existing = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(AppError::NotFound)?;

        let mut updated = existing.clone();
        updated.title = fields.title;
        updated.description = fields.description;
        updated.difficulty = fields.difficulty;
        updated.points = fields.points;
        updated.external_link = fields.external_link;
        Ok(updated)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AppError> {
        match &self.account {
            Some((known_email, known_password, user))
                if known_email == email && known_password == password =>
            {
                Ok(AuthSuccess {
                    user: user.clone(),
                    token: STUB_TOKEN.to_string(),
                })
            }
            _ => Err(AppError::Upstream {
                status: 401,
                message: "Invalid credentials".to_string(),
            }),
        }
    }

    async fn register(&self, req: RegisterRequest) -> Result<AuthSuccess, AppError> {
        if let Some((known_email, _, _)) = &self.account {
            if known_email == &req.email {
                return Err(AppError::Upstream {
                    status: 400,
                    message: "User already exists".to_string(),
                });
            }
        }

        Ok(AuthSuccess {
            user: User {
                id: 100,
                email: req.email,
                role: req.role,
                full_name: req.full_name,
                created_at: "2025-01-01 00:00:00".to_string(),
            },
            token: STUB_TOKEN.to_string(),
        })
    }

    async fn solutions_by_student(&self, student_id: i64) -> Result<Vec<Solution>, AppError> {
        Ok(self
            .solutions
            .iter()
            .filter(|solution| solution.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn solutions_by_task(&self, task_id: i64) -> Result<Vec<Solution>, AppError> {
        Ok(self
            .solutions
            .iter()
            .filter(|solution| solution.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn recent_solutions(&self) -> Result<Vec<Solution>, AppError> {
        Ok(self.solutions.clone())
    }

    async fn submit_solution(
        &self,
        student_id: i64,
        req: SubmitSolutionRequest,
    ) -> Result<Solution, AppError> {
        Ok(Solution {
            id: 42,
            student_id,
            task_id: req.task_id,
            solution_text: Some(req.solution_text),
            is_correct: None,
            points_earned: 0,
            teacher_comment: None,
            submitted_at: "2025-01-01 00:00:00".to_string(),
            checked_at: None,
            task_title: None,
            grade: None,
            subject: None,
            chapter_title: None,
            student_email: None,
            full_name: None,
        })
    }

    async fn review_solution(
        &self,
        id: i64,
        review: ReviewSolutionRequest,
        _checked_by: i64,
    ) -> Result<Solution, AppError> {
        let existing = self
            .solutions
            .iter()
            .find(|solution| solution.id == id)
            .ok_or(AppError::NotFound)?;

        let mut checked = existing.clone();
        checked.is_correct = Some(review.is_correct);
        checked.points_earned = review.points_earned;
        checked.teacher_comment = Some(review.teacher_comment);
        checked.checked_at = Some("2025-01-02 00:00:00".to_string());
        Ok(checked)
    }
}

pub fn teacher_user() -> User {
    User {
        id: 7,
        email: "teacher@example.com".to_string(),
        role: Role::Teacher,
        full_name: Some("Мария Ивановна".to_string()),
        created_at: "2024-09-01 00:00:00".to_string(),
    }
}

pub fn student_user() -> User {
    User {
        id: 3,
        email: "student@example.com".to_string(),
        role: Role::Student,
        full_name: None,
        created_at: "2024-09-01 00:00:00".to_string(),
    }
}

pub fn sample_task(id: i64, grade: Grade, subject: Subject, chapter_id: i32) -> Task {
    Task {
        id,
        grade,
        subject,
        chapter_id,
        chapter_title: "Глава".to_string(),
        title: format!("Задача {}", id),
        description: "Решите задачу".to_string(),
        difficulty: Difficulty::Medium,
        points: 10,
        external_link: None,
        created_at: "2025-01-01 00:00:00".to_string(),
    }
}

pub fn sample_solution(id: i64, student_id: i64, task_id: i64, checked: bool) -> Solution {
    Solution {
        id,
        student_id,
        task_id,
        solution_text: Some("x = 2".to_string()),
        is_correct: if checked { Some(true) } else { None },
        points_earned: if checked { 10 } else { 0 },
        teacher_comment: None,
        submitted_at: "2025-01-01 00:00:00".to_string(),
        checked_at: if checked {
            Some("2025-01-02 00:00:00".to_string())
        } else {
            None
        },
        task_title: None,
        grade: None,
        subject: None,
        chapter_title: None,
        student_email: None,
        full_name: None,
    }
}

pub async fn test_state(remote: Arc<dyn RemoteApi>) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    AppState::new(pool, remote)
}

pub async fn test_app(remote: Arc<dyn RemoteApi>) -> Router {
    router(test_state(remote).await)
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, value)
}

pub async fn login_as(app: &Router, email: &str, password: &str) {
    let (status, _) = request(
        app,
        "POST",
        "/auth/login",
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
