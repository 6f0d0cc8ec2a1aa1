pub mod error;
pub mod http;

pub use error::AnalysisError;
pub use http::HttpAnalysisClient;

use crate::domain::contract::ValidateResponse;

/// The remote analysis service. One call per validation; no retries, no
/// cancellation.
#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    fn service_name(&self) -> &'static str;

    /// Errors are [`AnalysisError::Network`] wrapped in `anyhow`. A reply with a
    /// non-success status is still `Ok`; the caller inspects it.
    async fn validate(&self, idea: &str) -> anyhow::Result<ValidateResponse>;
}
