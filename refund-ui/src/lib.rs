pub mod app;
pub mod config;
pub mod logging;
pub mod themes;
pub mod utils;
pub mod views;

pub use app::{RefundForm, Session};
pub use config::AppConfig;
