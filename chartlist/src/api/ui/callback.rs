//! Spotify authorization callback
//!
//! Spotify redirects here with `?code=...` after the user grants access,
//! or with `?error=...` when they decline.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{info, warn};

use super::render::{error_paragraph, escape_html, provider_error_notice, render_page};
use crate::AppState;

/// Query parameters of GET /callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GET /callback
///
/// On success the token is stored and the user is sent back to the form.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        warn!("Spotify authorization denied: {}", error);
        let notice = error_paragraph(
            "red",
            &format!("⚠️ Spotify authorization failed: {}", escape_html(&error)),
        );
        return Html(render_page(&notice)).into_response();
    }

    let Some(code) = params.code else {
        let notice = error_paragraph("red", "⚠️ Spotify authorization failed: no code received.");
        return Html(render_page(&notice)).into_response();
    };

    match state.auth.exchange_code(&code).await {
        Ok(()) => {
            info!("Spotify account connected");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            warn!("Spotify code exchange failed: {}", e);
            Html(render_page(&provider_error_notice(&e))).into_response()
        }
    }
}
