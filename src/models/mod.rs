pub mod solution;
pub mod task;
pub mod user;

pub use solution::{ReviewSolutionRequest, Solution, SubmitSolutionRequest};
pub use task::{Difficulty, Grade, NewTaskRequest, Subject, Task, UpdateTaskRequest};
pub use user::{LoginRequest, RegisterRequest, Role, User};
