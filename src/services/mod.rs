pub mod dashboard;

pub use dashboard::{DashboardService, DashboardSummary, StudentSummary, TeacherSummary};
