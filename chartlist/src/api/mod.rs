//! HTTP API handlers for chartlist
//!
//! - `ui`: the date form, its submission and the OAuth callback (HTML)
//! - `health`: service health (JSON)

pub mod health;
pub mod ui;

pub use health::health_routes;
pub use ui::ui_routes;
