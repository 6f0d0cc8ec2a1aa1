use std::fmt;

pub const DEFAULT_REJECTION_MESSAGE: &str = "Validation failed";

/// Failure of one validation round trip. All variants are transient for the user:
/// the input is kept and the request may be resubmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Transport failure or undecodable body.
    Network { detail: String },
    /// The service answered with a non-success status.
    Rejected { message: String },
    /// Success status, but neither per-section results nor a combined report.
    MalformedResponse,
}

impl AnalysisError {
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
        AnalysisError::Rejected { message }
    }

    /// Text shown to the user. Rejection messages are passed through verbatim;
    /// a malformed reply reads like a network failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Network { detail } => format!("Network error: {detail}"),
            AnalysisError::Rejected { message } => message.clone(),
            AnalysisError::MalformedResponse => {
                "Network error: the analysis service returned an unreadable report".to_string()
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Network { detail } => {
                write!(f, "analysis request failed (stage=network): {detail}")
            }
            AnalysisError::Rejected { message } => {
                write!(f, "analysis request failed (stage=status): {message}")
            }
            AnalysisError::MalformedResponse => write!(
                f,
                "analysis request failed (stage=normalize): response has neither results nor validation_report"
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}
