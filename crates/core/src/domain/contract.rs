use crate::analysis::error::AnalysisError;
use crate::domain::report::{Report, SectionBody, Sections};
use crate::domain::section::SectionKey;
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub idea: String,
}

/// Response of `POST /validate`, as loose as the service is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Option<RawResults>,
    #[serde(default)]
    pub validation_report: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub market_analysis: Option<String>,
    #[serde(default)]
    pub risk_analysis: Option<String>,
    #[serde(default)]
    pub monetization_strategy: Option<String>,
    #[serde(default)]
    pub investor_view: Option<String>,
}

impl RawResults {
    fn field(&self, key: SectionKey) -> Option<&str> {
        match key {
            SectionKey::Market => self.market_analysis.as_deref(),
            SectionKey::Risk => self.risk_analysis.as_deref(),
            SectionKey::Money => self.monetization_strategy.as_deref(),
            SectionKey::Investor => self.investor_view.as_deref(),
        }
    }
}

impl ValidateResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Checks the status, then normalizes.
    pub fn into_report(self, idea: &str) -> anyhow::Result<Report> {
        if !self.is_success() {
            return Err(AnalysisError::rejected(self.message).into());
        }
        normalize(idea, self)
    }
}

/// Maps a raw response onto the four sections.
///
/// Per-section `results` win when present; empty fields become
/// [`SectionBody::Pending`]. Otherwise a non-empty `validation_report` is kept
/// whole as the market body and the other three point back to it. With neither,
/// the error is [`AnalysisError::MalformedResponse`].
pub fn normalize(idea: &str, response: ValidateResponse) -> anyhow::Result<Report> {
    let mut sections = Sections::default();

    if let Some(results) = &response.results {
        for key in SectionKey::ALL {
            sections.set(key, results.field(key).unwrap_or_default());
        }
    } else if let Some(report) = response
        .validation_report
        .as_deref()
        .filter(|r| !r.trim().is_empty())
    {
        sections.set(SectionKey::Market, SectionBody::Text(report.to_string()));
        for key in [SectionKey::Risk, SectionKey::Money, SectionKey::Investor] {
            sections.set(key, SectionBody::SeeMarket);
        }
    } else {
        return Err(AnalysisError::MalformedResponse.into());
    }

    Report::new(idea, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::PENDING_TEXT;
    use serde_json::json;

    fn response(v: serde_json::Value) -> ValidateResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn structured_results_map_one_to_one() {
        let r = response(json!({
            "status": "success",
            "results": {
                "market_analysis": "## Market\nHuge",
                "risk_analysis": "Low",
                "monetization_strategy": "SaaS",
                "investor_view": "7/10",
            },
            "validation_report": "ignored",
        }));
        let report = r.into_report("Drone delivery").unwrap();
        assert_eq!(report.idea, "Drone delivery");
        assert_eq!(report.section(SectionKey::Market).as_str(), "## Market\nHuge");
        assert_eq!(report.section(SectionKey::Risk).as_str(), "Low");
        assert_eq!(report.section(SectionKey::Money).as_str(), "SaaS");
        assert_eq!(report.section(SectionKey::Investor).as_str(), "7/10");
    }

    #[test]
    fn empty_or_missing_fields_get_pending_placeholder() {
        let r = response(json!({
            "status": "success",
            "results": {
                "market_analysis": "text",
                "risk_analysis": "",
                "investor_view": null,
            },
        }));
        let report = normalize("idea", r).unwrap();
        assert_eq!(report.section(SectionKey::Market).as_str(), "text");
        for key in [SectionKey::Risk, SectionKey::Money, SectionKey::Investor] {
            assert_eq!(report.section(key), &SectionBody::Pending);
            assert_eq!(report.section(key).as_str(), PENDING_TEXT);
        }
    }

    #[test]
    fn service_text_matching_a_placeholder_stays_content() {
        let r = response(json!({
            "status": "success",
            "results": { "risk_analysis": PENDING_TEXT },
        }));
        let report = normalize("idea", r).unwrap();
        assert!(report.section(SectionKey::Risk).has_content());

        let day = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let scope = crate::export::ExportScope::Section(SectionKey::Risk);
        assert!(crate::export::render_document(Some(&report), scope, day).is_ok());
    }

    #[test]
    fn combined_report_goes_whole_into_market() {
        let text = "Market is big.\n\nRisks are many.";
        let r = response(json!({
            "status": "success",
            "validation_report": text,
        }));
        let report = normalize("idea", r).unwrap();
        assert_eq!(report.section(SectionKey::Market).as_str(), text);
        for key in [SectionKey::Risk, SectionKey::Money, SectionKey::Investor] {
            assert_eq!(report.section(key), &SectionBody::SeeMarket);
        }
    }

    #[test]
    fn missing_both_fields_is_malformed() {
        let r = response(json!({ "status": "success" }));
        let err = normalize("idea", r).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::MalformedResponse)
        );

        let r = response(json!({ "status": "success", "validation_report": "   " }));
        assert!(normalize("idea", r).is_err());
    }

    #[test]
    fn non_success_status_surfaces_message_verbatim() {
        let r = response(json!({ "status": "error", "message": "Model overloaded" }));
        let err = r.into_report("idea").unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::Rejected {
                message: "Model overloaded".to_string()
            })
        );
    }
}
