pub mod memory;
pub mod project;
pub mod user;

pub use memory::InMemoryProjectRepository;
pub use memory::InMemoryUserRepository;
pub use project::PostgresProjectRepository;
pub use user::PostgresUserRepository;
