pub mod dto;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Endpoints;
use crate::error::AppError;
use crate::models::{
    Grade, NewTaskRequest, RegisterRequest, ReviewSolutionRequest, Solution, Subject,
    SubmitSolutionRequest, Task, UpdateTaskRequest, User,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub grade: Option<Grade>,
    pub subject: Option<Subject>,
    pub chapter_id: Option<i32>,
}

impl TaskFilter {
    pub fn for_selection(grade: Grade, subject: Subject) -> Self {
        Self {
            grade: Some(grade),
            subject: Some(subject),
            chapter_id: None,
        }
    }
}

/// A successful auth exchange: the user row plus the opaque session token.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub user: User,
    pub token: String,
}

impl From<dto::AuthEnvelope> for AuthSuccess {
    fn from(envelope: dto::AuthEnvelope) -> Self {
        Self {
            user: envelope.user,
            token: envelope.token,
        }
    }
}

#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn fetch_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, AppError>;
    async fn create_task(&self, task: NewTaskRequest, created_by: i64) -> Result<Task, AppError>;
    async fn update_task(&self, id: i64, fields: UpdateTaskRequest) -> Result<Task, AppError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AppError>;
    async fn register(&self, req: RegisterRequest) -> Result<AuthSuccess, AppError>;
    async fn solutions_by_student(&self, student_id: i64) -> Result<Vec<Solution>, AppError>;
    async fn solutions_by_task(&self, task_id: i64) -> Result<Vec<Solution>, AppError>;
    async fn recent_solutions(&self) -> Result<Vec<Solution>, AppError>;
    async fn submit_solution(
        &self,
        student_id: i64,
        req: SubmitSolutionRequest,
    ) -> Result<Solution, AppError>;
    async fn review_solution(
        &self,
        id: i64,
        review: ReviewSolutionRequest,
        checked_by: i64,
    ) -> Result<Solution, AppError>;
}

pub struct HttpRemoteApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpRemoteApi {
    pub fn new(endpoints: Endpoints) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(AppError::Request)?;
        Ok(Self { client, endpoints })
    }

    /// Upstream errors carry `{"error": ...}`; fall back to the raw body
    /// when the envelope is missing.
    async fn upstream_error(response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<dto::ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error)
            .filter(|error| !error.is_empty())
            .unwrap_or(body);
        AppError::Upstream { status, message }
    }

    async fn auth_exchange(&self, body: dto::AuthRequestBody) -> Result<AuthSuccess, AppError> {
        let response = self
            .client
            .post(&self.endpoints.auth_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::AuthEnvelope>().await?;
        Ok(envelope.into())
    }

    async fn fetch_solutions(&self, query: &[(&str, String)]) -> Result<Vec<Solution>, AppError> {
        let response = self
            .client
            .get(&self.endpoints.solutions_url)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::SolutionsEnvelope>().await?;
        Ok(envelope.solutions)
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn fetch_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(grade) = filter.grade {
            query.push(("grade", grade.number().to_string()));
        }
        if let Some(subject) = filter.subject {
            query.push(("subject", subject.as_str().to_string()));
        }
        if let Some(chapter_id) = filter.chapter_id {
            query.push(("chapter_id", chapter_id.to_string()));
        }

        let response = self
            .client
            .get(&self.endpoints.tasks_url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::TasksEnvelope>().await?;
        Ok(envelope.tasks)
    }

    async fn create_task(&self, task: NewTaskRequest, created_by: i64) -> Result<Task, AppError> {
        let body = dto::CreateTaskBody { task, created_by };
        let response = self
            .client
            .post(&self.endpoints.tasks_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::TaskEnvelope>().await?;
        Ok(envelope.task)
    }

    async fn update_task(&self, id: i64, fields: UpdateTaskRequest) -> Result<Task, AppError> {
        let body = dto::UpdateTaskBody { id, fields };
        let response = self
            .client
            .put(&self.endpoints.tasks_url)
            .json(&body)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(AppError::NotFound);
        }
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::TaskEnvelope>().await?;
        Ok(envelope.task)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, AppError> {
        self.auth_exchange(dto::AuthRequestBody {
            action: "login",
            email: email.to_string(),
            password: password.to_string(),
            role: None,
            full_name: None,
        })
        .await
    }

    async fn register(&self, req: RegisterRequest) -> Result<AuthSuccess, AppError> {
        self.auth_exchange(dto::AuthRequestBody {
            action: "register",
            email: req.email,
            password: req.password,
            role: Some(req.role),
            full_name: req.full_name,
        })
        .await
    }

    async fn solutions_by_student(&self, student_id: i64) -> Result<Vec<Solution>, AppError> {
        self.fetch_solutions(&[("student_id", student_id.to_string())])
            .await
    }

    async fn solutions_by_task(&self, task_id: i64) -> Result<Vec<Solution>, AppError> {
        self.fetch_solutions(&[("task_id", task_id.to_string())])
            .await
    }

    async fn recent_solutions(&self) -> Result<Vec<Solution>, AppError> {
        self.fetch_solutions(&[]).await
    }

    async fn submit_solution(
        &self,
        student_id: i64,
        req: SubmitSolutionRequest,
    ) -> Result<Solution, AppError> {
        let body = dto::SubmitSolutionBody {
            student_id,
            task_id: req.task_id,
            solution_text: req.solution_text,
        };
        let response = self
            .client
            .post(&self.endpoints.solutions_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::SolutionEnvelope>().await?;
        Ok(envelope.solution)
    }

    async fn review_solution(
        &self,
        id: i64,
        review: ReviewSolutionRequest,
        checked_by: i64,
    ) -> Result<Solution, AppError> {
        let body = dto::ReviewSolutionBody {
            id,
            is_correct: review.is_correct,
            points_earned: review.points_earned,
            teacher_comment: review.teacher_comment,
            checked_by,
        };
        let response = self
            .client
            .put(&self.endpoints.solutions_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope = response.json::<dto::SolutionEnvelope>().await?;
        Ok(envelope.solution)
    }
}

/// Offline stand-in: listings come back empty, mutations fail loudly.
pub struct NoopRemoteApi;

#[async_trait]
impl RemoteApi for NoopRemoteApi {
    async fn fetch_tasks(&self, _filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        Ok(Vec::new())
    }

    async fn create_task(&self, _task: NewTaskRequest, _created_by: i64) -> Result<Task, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }

    async fn update_task(&self, _id: i64, _fields: UpdateTaskRequest) -> Result<Task, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthSuccess, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }

    async fn register(&self, _req: RegisterRequest) -> Result<AuthSuccess, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }

    async fn solutions_by_student(&self, _student_id: i64) -> Result<Vec<Solution>, AppError> {
        Ok(Vec::new())
    }

    async fn solutions_by_task(&self, _task_id: i64) -> Result<Vec<Solution>, AppError> {
        Ok(Vec::new())
    }

    async fn recent_solutions(&self) -> Result<Vec<Solution>, AppError> {
        Ok(Vec::new())
    }

    async fn submit_solution(
        &self,
        _student_id: i64,
        _req: SubmitSolutionRequest,
    ) -> Result<Solution, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }

    async fn review_solution(
        &self,
        _id: i64,
        _review: ReviewSolutionRequest,
        _checked_by: i64,
    ) -> Result<Solution, AppError> {
        Err(AppError::Upstream {
            status: 503,
            message: "remote API disabled".to_string(),
        })
    }
}
