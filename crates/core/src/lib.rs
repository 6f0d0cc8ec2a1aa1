pub mod analysis;
pub mod domain;
pub mod export;
pub mod format;
pub mod history;
pub mod render;
pub mod session;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_ANALYSIS_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_HISTORY_DIR: &str = ".ideacheck";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub analysis_base_url: Option<String>,
        pub analysis_timeout_secs: Option<u64>,
        pub history_dir: Option<PathBuf>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let analysis_timeout_secs = match std::env::var("ANALYSIS_TIMEOUT_SECS") {
                Ok(s) if !s.trim().is_empty() => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("ANALYSIS_TIMEOUT_SECS is not a number: {s}"))?,
                ),
                _ => None,
            };

            Ok(Self {
                analysis_base_url: non_empty_var("ANALYSIS_BASE_URL"),
                analysis_timeout_secs,
                history_dir: non_empty_var("HISTORY_DIR").map(PathBuf::from),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn analysis_base_url(&self) -> &str {
            self.analysis_base_url
                .as_deref()
                .unwrap_or(DEFAULT_ANALYSIS_BASE_URL)
        }

        pub fn history_dir(&self) -> PathBuf {
            self.history_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_DIR))
        }

        pub fn require_sentry_dsn(&self) -> anyhow::Result<&str> {
            self.sentry_dsn.as_deref().context("SENTRY_DSN is required")
        }
    }

    fn non_empty_var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

}
