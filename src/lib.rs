//! LocalLib Library Catalog Server
//!
//! A Rust implementation of a library catalog: authors, books, physical
//! copies, genres and loans, served over a REST JSON API with a staff
//! permission gating every catalog write.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
