pub mod credential;
pub mod handlers;
pub mod router;
