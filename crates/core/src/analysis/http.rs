use crate::analysis::error::AnalysisError;
use crate::analysis::AnalysisClient;
use crate::config::Settings;
use crate::domain::contract::{ValidateRequest, ValidateResponse};
use anyhow::Context;
use std::time::Duration;

const VALIDATE_PATH: &str = "/validate";

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.analysis_base_url(), settings.analysis_timeout_secs)
    }

    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build analysis http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, VALIDATE_PATH)
    }
}

fn network(detail: impl std::fmt::Display) -> anyhow::Error {
    AnalysisError::Network {
        detail: detail.to_string(),
    }
    .into()
}

#[async_trait::async_trait]
impl AnalysisClient for HttpAnalysisClient {
    fn service_name(&self) -> &'static str {
        "http_validate"
    }

    async fn validate(&self, idea: &str) -> anyhow::Result<ValidateResponse> {
        let url = self.url();
        let t0 = std::time::Instant::now();

        let res = self
            .http
            .post(&url)
            .json(&ValidateRequest {
                idea: idea.to_string(),
            })
            .send()
            .await
            .map_err(network)?;

        let status = res.status();
        let text = res.text().await.map_err(network)?;

        tracing::debug!(
            %url,
            %status,
            elapsed_ms = t0.elapsed().as_millis(),
            body_len = text.len(),
            "analysis service responded"
        );

        // The service reports failures in the body; only an unreadable body with an
        // error status is a transport problem.
        match serde_json::from_str::<ValidateResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(network(format!("HTTP {status}"))),
            Err(e) => Err(network(format!("response is not valid JSON: {e}"))),
        }
    }
}
