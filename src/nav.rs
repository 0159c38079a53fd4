use serde::{Deserialize, Serialize};

use crate::models::{Grade, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Grade,
    Subject,
    Tasks,
    Dashboard,
}

/// The top-level view container: which screen is showing and what the user
/// has picked so far. Back navigation never clears the selections, so
/// re-entering a level keeps the previous choice highlighted.
#[derive(Debug, Clone)]
pub struct ViewState {
    view: View,
    grade: Grade,
    subject: Subject,
    search: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            view: View::Grade,
            grade: Grade::Eight,
            subject: Subject::Algebra,
            search: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn select_grade(&mut self, grade: Grade) {
        self.grade = grade;
        self.view = View::Subject;
    }

    pub fn select_subject(&mut self, subject: Subject) {
        self.subject = subject;
        self.view = View::Tasks;
    }

    /// Pops one level. On the grade screen there is nowhere to go, so it
    /// stays put; closing the dashboard lands back on the grade screen.
    pub fn back(&mut self) {
        self.view = match self.view {
            View::Tasks => View::Subject,
            View::Subject => View::Grade,
            View::Dashboard => View::Grade,
            View::Grade => View::Grade,
        };
    }

    pub fn open_dashboard(&mut self) {
        self.view = View::Dashboard;
    }

    pub fn close_dashboard(&mut self) {
        if self.view == View::Dashboard {
            self.view = View::Grade;
        }
    }

    pub fn set_search(&mut self, query: &str) {
        let trimmed = query.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            view: self.view,
            grade: self.grade,
            subject: self.subject,
            search: self.search.clone(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub view: View,
    pub grade: Grade,
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
