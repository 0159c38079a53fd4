use std::env;

// Deployed cloud-function endpoints the SPA has always talked to.
const DEFAULT_TASKS_URL: &str =
    "https://functions.poehali.dev/282a8b19-c7ee-4f4b-a313-b297a0be3573";
const DEFAULT_AUTH_URL: &str =
    "https://functions.poehali.dev/66c969fb-1c90-4df9-a551-1eceb9fbb1ea";
const DEFAULT_SOLUTIONS_URL: &str =
    "https://functions.poehali.dev/ffe0152c-4f0d-42c7-8bda-af0b9c2ad4ae";

/// Base URLs of the three upstream services.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub tasks_url: String,
    pub auth_url: String,
    pub solutions_url: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self {
            tasks_url: env::var("TASKS_API_URL")
                .unwrap_or_else(|_| DEFAULT_TASKS_URL.to_string()),
            auth_url: env::var("AUTH_API_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            solutions_url: env::var("SOLUTIONS_API_URL")
                .unwrap_or_else(|_| DEFAULT_SOLUTIONS_URL.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub endpoints: Endpoints,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://matempraktika.db?mode=rwc".to_string()),
            endpoints: Endpoints::from_env(),
        }
    }
}
