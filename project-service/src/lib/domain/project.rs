pub mod errors;
pub mod models;
pub mod mutation;
pub mod ports;
pub mod service;
