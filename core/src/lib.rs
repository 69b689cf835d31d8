pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{
    MessagesRepositories, MessagesService, create_repositories, in_memory_repositories,
};
pub use domain::common::services::Service;
pub use infrastructure::health::repositories::postgres::PostgresHealthRepository;
pub use infrastructure::message::repositories::memory::InMemoryMessageRepository;
pub use infrastructure::message::repositories::postgres::PostgresMessageRepository;
