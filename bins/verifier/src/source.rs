//! Where the verifier reads a yearly report from.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use tahsilat_core::reports::YearlyReport;
use tracing::debug;

/// Location of the report to verify.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Reporting API base URL.
    Api(String),
    /// Saved JSON response.
    File(PathBuf),
}

impl ReportSource {
    /// Loads the yearly report for `year`.
    pub async fn load(&self, year: i32) -> anyhow::Result<YearlyReport> {
        match self {
            Self::Api(base_url) => {
                let url = yearly_url(base_url, year);
                debug!(%url, "Fetching yearly report");
                let response = reqwest::get(&url)
                    .await
                    .with_context(|| format!("Failed to reach {url}"))?
                    .error_for_status()
                    .with_context(|| format!("Report request to {url} failed"))?;
                response
                    .json::<YearlyReport>()
                    .await
                    .context("Response is not a yearly report")
            }
            Self::File(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_report(&raw)
            }
        }
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(base_url) => f.write_str(base_url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Builds the yearly report URL under the versioned API prefix.
pub fn yearly_url(base_url: &str, year: i32) -> String {
    format!("{}/api/v1/reports/yearly/{year}", base_url.trim_end_matches('/'))
}

/// Parses a saved report. Extra fields such as `rejected_records` are ignored.
pub fn parse_report(raw: &str) -> anyhow::Result<YearlyReport> {
    serde_json::from_str(raw).context("File is not a yearly report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_url() {
        assert_eq!(
            yearly_url("http://localhost:8080/", 2025),
            "http://localhost:8080/api/v1/reports/yearly/2025"
        );
    }

    #[test]
    fn test_parse_api_response() {
        let raw = r#"{
            "year": 2025,
            "project_summary": {"mkm": "10", "msm": "0"},
            "location_summary": {"OFİS": {"mkm": "10", "msm": "0", "total": "10"}},
            "payment_methods": {"Nakit": {"tl": "0", "usd": "10", "total_usd": "10"}},
            "mkm_payment_methods": {"Nakit": {"tl": "0", "usd": "10", "total_usd": "10"}},
            "msm_payment_methods": {},
            "monthly_reports": [],
            "rejected_records": [],
            "reconciliation": {"tolerance": "0.01", "checks": [], "passed": true}
        }"#;
        let report = parse_report(raw).unwrap();
        assert_eq!(report.year, 2025);
        assert_eq!(report.project_methods.0.len(), 2);
        assert_eq!(report.location_summary.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_report("{\"year\": \"soon\"}").is_err());
    }
}
