pub mod app;
pub mod backend;
pub mod calendar;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::router;
pub use backend::BackendClient;
pub use config::Config;
pub use state::AppState;
