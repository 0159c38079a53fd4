use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
}

/// Одно всплывающее уведомление. Lives until the UI dismisses it.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    notices: Mutex<Vec<Notice>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, kind: NoticeKind, title: &str, message: &str) -> Notice {
        let notice = Notice {
            id: Uuid::new_v4(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.notices.lock().await.push(notice.clone());
        notice
    }

    pub async fn info(&self, title: &str, message: &str) -> Notice {
        self.push(NoticeKind::Info, title, message).await
    }

    pub async fn error(&self, title: &str, message: &str) -> Notice {
        self.push(NoticeKind::Error, title, message).await
    }

    pub async fn list(&self) -> Vec<Notice> {
        self.notices.lock().await.clone()
    }

    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut notices = self.notices.lock().await;
        let before = notices.len();
        notices.retain(|notice| notice.id != id);
        notices.len() < before
    }
}
