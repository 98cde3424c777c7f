pub mod app;
pub mod auth;
pub mod calendar;
pub mod cli;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod status;
pub mod store;

pub use app::app;
pub use state::AppState;
