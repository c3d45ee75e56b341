//! UI Routes - HTML pages for the chartlist web form
//!
//! # Structure
//! - **Root Page** (`root`): the date form and its submission
//! - **Callback** (`callback`): Spotify authorization redirect target
//! - **Render** (`render`): page shell, form and inline messages
//!
//! Every branch answers 200 with HTML; failures are body content.

use axum::{routing::get, Router};
use crate::AppState;

mod callback;
pub mod render;
mod root;

use callback::oauth_callback;
use root::{root_page, submit_date};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page).post(submit_date))
        .route("/callback", get(oauth_callback))
}
