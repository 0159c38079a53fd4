use dotenvy::dotenv;
use reqwest::Client;
use serde::Deserialize;
use std::env;

const DEFAULT_TASKS_URL: &str =
    "https://functions.poehali.dev/282a8b19-c7ee-4f4b-a313-b297a0be3573";

// One starter task per textbook chapter so the accordion is not empty on a
// fresh deployment. (grade, subject, chapter_id, chapter_title)
const CHAPTERS: &[(u8, &str, i32, &str)] = &[
    (8, "algebra", 1, "Рациональные дроби"),
    (8, "algebra", 2, "Квадратные корни"),
    (8, "algebra", 3, "Квадратные уравнения"),
    (8, "algebra", 4, "Неравенства"),
    (8, "algebra", 5, "Степень с целым показателем"),
    (8, "geometry", 1, "Четырёхугольники"),
    (8, "geometry", 2, "Площадь"),
    (8, "geometry", 3, "Подобные треугольники"),
    (8, "geometry", 4, "Окружность"),
    (8, "geometry", 5, "Векторы"),
    (9, "algebra", 1, "Квадратичная функция"),
    (9, "algebra", 2, "Уравнения и неравенства с одной переменной"),
    (9, "algebra", 3, "Уравнения и неравенства с двумя переменными"),
    (9, "algebra", 4, "Арифметическая и геометрическая прогрессии"),
    (9, "algebra", 5, "Элементы комбинаторики и теории вероятностей"),
    (9, "geometry", 1, "Метод координат"),
    (9, "geometry", 2, "Соотношения между сторонами и углами треугольника"),
    (9, "geometry", 3, "Длина окружности и площадь круга"),
    (9, "geometry", 4, "Движения"),
    (9, "geometry", 5, "Начальные сведения из стереометрии"),
];

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[derive(Debug, Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<ExistingTask>,
}

#[derive(Debug, Deserialize)]
struct ExistingTask {
    grade: u8,
    subject: String,
    chapter_id: i32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let tasks_url = env::var("TASKS_API_URL").unwrap_or_else(|_| DEFAULT_TASKS_URL.to_string());
    let created_by: i64 = env::var("SEED_TEACHER_ID")
        .unwrap_or_else(|_| "1".to_string())
        .parse()?;

    let client = Client::new();
    let dry_run = is_dry_run();

    let existing: TasksResponse = client.get(&tasks_url).send().await?.json().await?;
    println!("Found {} existing tasks", existing.tasks.len());

    let mut created = 0;
    let mut skipped = 0;

    for &(grade, subject, chapter_id, chapter_title) in CHAPTERS {
        let already_seeded = existing.tasks.iter().any(|task| {
            task.grade == grade && task.subject == subject && task.chapter_id == chapter_id
        });
        if already_seeded {
            skipped += 1;
            continue;
        }

        let body = serde_json::json!({
            "grade": grade,
            "subject": subject,
            "chapter_id": chapter_id,
            "chapter_title": chapter_title,
            "title": format!("Разминка: {}", chapter_title),
            "description": format!(
                "Вводная задача по теме «{}». Решите её и отправьте ответ на проверку.",
                chapter_title
            ),
            "difficulty": "easy",
            "points": 5,
            "created_by": created_by,
        });

        if dry_run {
            println!(
                "[dry-run] would create task for {}/{} chapter {}",
                grade, subject, chapter_id
            );
            created += 1;
            continue;
        }

        let response = client.post(&tasks_url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            eprintln!(
                "Failed to create task for {}/{} chapter {}: {} {}",
                grade, subject, chapter_id, status, text
            );
            continue;
        }
        created += 1;
    }

    println!(
        "Done: {} created, {} skipped{}",
        created,
        skipped,
        if dry_run { " (dry-run, pass --apply to write)" } else { "" }
    );

    Ok(())
}
