// Library exports for testing
pub mod auth;
pub mod config;
pub mod directory;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod session;
pub mod storage;
