pub mod api;
pub mod config;
pub mod errors;
pub mod file;
pub mod models;
pub mod render;
pub mod session;
pub mod views;
