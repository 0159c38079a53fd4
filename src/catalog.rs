use serde::Serialize;

use crate::models::{Grade, Subject, Task};

/// Главы учебника для пары (класс, предмет). The set is fixed by the
/// curriculum; tasks hang off chapters by `chapter_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    pub id: i32,
    pub title: &'static str,
}

const GRADE8_ALGEBRA: [Chapter; 5] = [
    Chapter { id: 1, title: "Рациональные дроби" },
    Chapter { id: 2, title: "Квадратные корни" },
    Chapter { id: 3, title: "Квадратные уравнения" },
    Chapter { id: 4, title: "Неравенства" },
    Chapter { id: 5, title: "Степень с целым показателем" },
];

const GRADE8_GEOMETRY: [Chapter; 5] = [
    Chapter { id: 1, title: "Четырёхугольники" },
    Chapter { id: 2, title: "Площадь" },
    Chapter { id: 3, title: "Подобные треугольники" },
    Chapter { id: 4, title: "Окружность" },
    Chapter { id: 5, title: "Векторы" },
];

const GRADE9_ALGEBRA: [Chapter; 5] = [
    Chapter { id: 1, title: "Квадратичная функция" },
    Chapter { id: 2, title: "Уравнения и неравенства с одной переменной" },
    Chapter { id: 3, title: "Уравнения и неравенства с двумя переменными" },
    Chapter { id: 4, title: "Арифметическая и геометрическая прогрессии" },
    Chapter { id: 5, title: "Элементы комбинаторики и теории вероятностей" },
];

const GRADE9_GEOMETRY: [Chapter; 5] = [
    Chapter { id: 1, title: "Метод координат" },
    Chapter { id: 2, title: "Соотношения между сторонами и углами треугольника" },
    Chapter { id: 3, title: "Длина окружности и площадь круга" },
    Chapter { id: 4, title: "Движения" },
    Chapter { id: 5, title: "Начальные сведения из стереометрии" },
];

pub fn chapters_for(grade: Grade, subject: Subject) -> &'static [Chapter] {
    match (grade, subject) {
        (Grade::Eight, Subject::Algebra) => &GRADE8_ALGEBRA,
        (Grade::Eight, Subject::Geometry) => &GRADE8_GEOMETRY,
        (Grade::Nine, Subject::Algebra) => &GRADE9_ALGEBRA,
        (Grade::Nine, Subject::Geometry) => &GRADE9_GEOMETRY,
    }
}

/// A chapter as the UI renders it: catalog entry plus the number of tasks
/// currently available in it.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSummary {
    pub id: i32,
    pub title: String,
    pub tasks_count: usize,
}

pub fn summarize(grade: Grade, subject: Subject, tasks: &[Task]) -> Vec<ChapterSummary> {
    chapters_for(grade, subject)
        .iter()
        .map(|chapter| ChapterSummary {
            id: chapter.id,
            title: chapter.title.to_string(),
            tasks_count: tasks
                .iter()
                .filter(|task| {
                    task.grade == grade
                        && task.subject == subject
                        && task.chapter_id == chapter.id
                })
                .count(),
        })
        .collect()
}
