use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::nav::ViewState;
use crate::notify::NotificationCenter;
use crate::remote::RemoteApi;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub remote: Arc<dyn RemoteApi>,
    pub nav: Arc<Mutex<ViewState>>,
    pub notices: Arc<NotificationCenter>,
}

impl AppState {
    pub fn new(db: SqlitePool, remote: Arc<dyn RemoteApi>) -> Self {
        Self {
            db,
            remote,
            nav: Arc::new(Mutex::new(ViewState::new())),
            notices: Arc::new(NotificationCenter::new()),
        }
    }
}
