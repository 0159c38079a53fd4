use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::catalog::{self, ChapterSummary};
use crate::db::Session;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{
    Grade, LoginRequest, NewTaskRequest, RegisterRequest, ReviewSolutionRequest, Role, Solution,
    Subject, SubmitSolutionRequest, Task, UpdateTaskRequest, User,
};
use crate::nav::ViewSnapshot;
use crate::notify::Notice;
use crate::remote::TaskFilter;
use crate::services::{DashboardService, DashboardSummary};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/view", get(current_view))
        .route("/view/grade", post(select_grade))
        .route("/view/subject", post(select_subject))
        .route("/view/back", post(go_back))
        .route("/view/dashboard", post(open_dashboard))
        .route("/view/close", post(close_dashboard))
        .route("/view/search", post(set_search))
        .route("/chapters", get(list_chapters))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/session", get(current_session))
        .route("/solutions", get(list_solutions).post(submit_solution))
        .route("/solutions/{id}", put(review_solution))
        .route("/dashboard", get(dashboard))
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/dismiss", post(dismiss_notification))
        .with_state(state)
}

#[derive(Deserialize)]
struct GradeSelection {
    grade: Grade,
}

#[derive(Deserialize)]
struct SubjectSelection {
    subject: Subject,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

#[derive(Deserialize)]
struct ChapterQuery {
    grade: Option<Grade>,
    subject: Option<Subject>,
}

#[derive(Deserialize)]
struct TasksQuery {
    grade: Option<Grade>,
    subject: Option<Subject>,
    chapter_id: Option<i32>,
}

#[derive(Deserialize)]
struct SolutionsQuery {
    student_id: Option<i64>,
    task_id: Option<i64>,
}

// Responses mirror the upstream envelopes so the SPA reads one shape.
#[derive(Serialize)]
struct TasksResponse {
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct TaskResponse {
    task: Task,
}

#[derive(Serialize)]
struct SolutionsResponse {
    solutions: Vec<Solution>,
}

#[derive(Serialize)]
struct SolutionResponse {
    solution: Solution,
}

#[derive(Serialize)]
struct AuthResponse {
    user: User,
    token: String,
}

async fn require_session(state: &AppState) -> Result<Session, AppError> {
    repository::load_session(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)
}

async fn require_teacher(state: &AppState) -> Result<Session, AppError> {
    let session = require_session(state).await?;
    if session.role != Role::Teacher {
        return Err(AppError::Forbidden);
    }
    Ok(session)
}

fn welcome_message(role: Role) -> &'static str {
    match role {
        Role::Teacher => "Добро пожаловать, учитель!",
        Role::Student => "Добро пожаловать, ученик!",
    }
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn current_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    let nav = state.nav.lock().await;
    Json(nav.snapshot())
}

async fn select_grade(
    State(state): State<AppState>,
    Json(req): Json<GradeSelection>,
) -> Json<ViewSnapshot> {
    let mut nav = state.nav.lock().await;
    nav.select_grade(req.grade);
    Json(nav.snapshot())
}

async fn select_subject(
    State(state): State<AppState>,
    Json(req): Json<SubjectSelection>,
) -> Json<ViewSnapshot> {
    let mut nav = state.nav.lock().await;
    nav.select_subject(req.subject);
    Json(nav.snapshot())
}

async fn go_back(State(state): State<AppState>) -> Json<ViewSnapshot> {
    let mut nav = state.nav.lock().await;
    nav.back();
    Json(nav.snapshot())
}

/// The dashboard is only reachable with an active session; the UI opens
/// the auth dialog when this comes back 401.
async fn open_dashboard(State(state): State<AppState>) -> Result<Json<ViewSnapshot>, AppError> {
    require_session(&state).await?;
    let mut nav = state.nav.lock().await;
    nav.open_dashboard();
    Ok(Json(nav.snapshot()))
}

async fn close_dashboard(State(state): State<AppState>) -> Json<ViewSnapshot> {
    let mut nav = state.nav.lock().await;
    nav.close_dashboard();
    Json(nav.snapshot())
}

async fn set_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<ViewSnapshot> {
    let snapshot = {
        let mut nav = state.nav.lock().await;
        nav.set_search(&req.query);
        nav.snapshot()
    };

    if let Some(query) = snapshot.search.as_deref() {
        state
            .notices
            .info("Поиск", &format!("Ищем задачи по запросу: \"{}\"", query))
            .await;
    }

    Json(snapshot)
}

async fn list_chapters(
    State(state): State<AppState>,
    Query(params): Query<ChapterQuery>,
) -> Json<Vec<ChapterSummary>> {
    let (grade, subject) = {
        let nav = state.nav.lock().await;
        (
            params.grade.unwrap_or(nav.grade()),
            params.subject.unwrap_or(nav.subject()),
        )
    };

    // Chapter structure is fixed; a dead tasks endpoint only zeroes the
    // counts.
    let tasks = match state
        .remote
        .fetch_tasks(TaskFilter::for_selection(grade, subject))
        .await
    {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("failed to fetch tasks for chapter counts: {}", e);
            Vec::new()
        }
    };

    Json(catalog::summarize(grade, subject, &tasks))
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<TasksQuery>,
) -> Json<TasksResponse> {
    let (grade, subject) = {
        let nav = state.nav.lock().await;
        (
            params.grade.unwrap_or(nav.grade()),
            params.subject.unwrap_or(nav.subject()),
        )
    };

    let tasks = match state
        .remote
        .fetch_tasks(TaskFilter::for_selection(grade, subject))
        .await
    {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("failed to fetch tasks: {}", e);
            state
                .notices
                .error("Ошибка загрузки", "Не удалось загрузить задачи")
                .await;
            Vec::new()
        }
    };

    let tasks = match params.chapter_id {
        Some(chapter_id) => tasks
            .into_iter()
            .filter(|task| task.chapter_id == chapter_id)
            .collect(),
        None => tasks,
    };

    Json(TasksResponse { tasks })
}

async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<NewTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let session = require_teacher(&state).await?;
    let task = state.remote.create_task(req, session.user_id).await?;
    info!("task {} created by user {}", task.id, session.user_id);
    Ok(Json(TaskResponse { task }))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    require_teacher(&state).await?;
    let task = state.remote.update_task(id, req).await?;
    Ok(Json(TaskResponse { task }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    match state.remote.login(&req.email, &req.password).await {
        Ok(auth) => {
            repository::save_session(&state.db, &auth.user, &auth.token).await?;
            info!("user {} logged in as {}", auth.user.id, auth.user.role.as_str());
            state
                .notices
                .info("Вход выполнен", welcome_message(auth.user.role))
                .await;
            Ok(Json(AuthResponse {
                user: auth.user,
                token: auth.token,
            }))
        }
        Err(AppError::Upstream { status: 400 | 401, .. }) => {
            state
                .notices
                .error("Ошибка входа", "Неверный email или пароль")
                .await;
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            state
                .notices
                .error("Ошибка входа", "Сервис авторизации недоступен")
                .await;
            Err(e)
        }
    }
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    match state.remote.register(req).await {
        Ok(auth) => {
            repository::save_session(&state.db, &auth.user, &auth.token).await?;
            info!("user {} registered as {}", auth.user.id, auth.user.role.as_str());
            state
                .notices
                .info("Регистрация завершена", welcome_message(auth.user.role))
                .await;
            Ok(Json(AuthResponse {
                user: auth.user,
                token: auth.token,
            }))
        }
        Err(AppError::Upstream { status: 400, message }) => {
            state
                .notices
                .error("Ошибка регистрации", "Пользователь с таким email уже существует")
                .await;
            Err(AppError::BadRequest(message))
        }
        Err(e) => {
            state
                .notices
                .error("Ошибка регистрации", "Сервис авторизации недоступен")
                .await;
            Err(e)
        }
    }
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    repository::clear_session(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn current_session(
    State(state): State<AppState>,
) -> Result<Json<Option<Session>>, AppError> {
    let session = repository::load_session(&state.db).await?;
    Ok(Json(session))
}

async fn list_solutions(
    State(state): State<AppState>,
    Query(params): Query<SolutionsQuery>,
) -> Result<Json<SolutionsResponse>, AppError> {
    let solutions = if let Some(student_id) = params.student_id {
        state.remote.solutions_by_student(student_id).await?
    } else if let Some(task_id) = params.task_id {
        state.remote.solutions_by_task(task_id).await?
    } else {
        state.remote.recent_solutions().await?
    };

    Ok(Json(SolutionsResponse { solutions }))
}

async fn submit_solution(
    State(state): State<AppState>,
    Json(req): Json<SubmitSolutionRequest>,
) -> Result<Json<SolutionResponse>, AppError> {
    let session = require_session(&state).await?;
    if session.role != Role::Student {
        return Err(AppError::Forbidden);
    }

    let solution = state.remote.submit_solution(session.user_id, req).await?;
    info!(
        "solution {} submitted by student {} for task {}",
        solution.id, session.user_id, solution.task_id
    );
    Ok(Json(SolutionResponse { solution }))
}

async fn review_solution(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ReviewSolutionRequest>,
) -> Result<Json<SolutionResponse>, AppError> {
    let session = require_teacher(&state).await?;
    let solution = state.remote.review_solution(id, req, session.user_id).await?;
    info!("solution {} checked by teacher {}", id, session.user_id);
    Ok(Json(SolutionResponse { solution }))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let session = require_session(&state).await?;
    let summary = DashboardService::new(state.remote.clone())
        .summary_for(&session)
        .await?;
    Ok(Json(summary))
}

async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notice>> {
    Json(state.notices.list().await)
}

async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.notices.dismiss(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
