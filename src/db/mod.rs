pub mod repository;

pub use repository::Session;
