pub mod app;
pub mod calendar;
pub mod cache;
pub mod config;
pub mod contract;
pub mod dates;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod pace;
pub mod push;
pub mod registry;
pub mod reminder;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
