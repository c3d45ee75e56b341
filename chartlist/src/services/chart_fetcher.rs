//! Chart page retrieval
//!
//! One GET per request to the configured URL template, with a static
//! User-Agent. No retries and no caching across requests.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::DATE_PLACEHOLDER;
use crate::error::FetchError;
use crate::types::{ChartDate, ChartSource};

/// Interpolate `date` into a chart URL template
pub fn chart_url(template: &str, date: ChartDate) -> String {
    template.replace(DATE_PLACEHOLDER, &date.to_string())
}

/// Chart source reached over HTTP
pub struct HttpChartSource {
    http_client: reqwest::Client,
    url_template: String,
}

impl HttpChartSource {
    pub fn new(url_template: impl Into<String>, user_agent: &str) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url_template: url_template.into(),
        })
    }
}

#[async_trait]
impl ChartSource for HttpChartSource {
    async fn fetch_chart(&self, date: ChartDate) -> Result<String, FetchError> {
        let url = chart_url(&self.url_template, date);

        tracing::debug!(url = %url, "Fetching chart page");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status_reason(status),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        tracing::info!(url = %url, bytes = body.len(), "Fetched chart page");
        Ok(body)
    }
}

/// "Client Error: Not Found" style description of a failing status
fn status_reason(status: StatusCode) -> String {
    let class = if status.is_client_error() {
        "Client Error"
    } else if status.is_server_error() {
        "Server Error"
    } else {
        "Error"
    };

    match status.canonical_reason() {
        Some(reason) => format!("{}: {}", class, reason),
        None => class.to_string(),
    }
}
