use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Share thresholds for the location classifier.
///
/// Each rule fires only when its share is strictly greater than the
/// threshold. Observed deployments used 0.30 for office and 0.20 for
/// drive-through; the defaults here are the canonical 0.25 and 0.15.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierThresholds {
    pub university_share: f64,
    pub office_share: f64,
    pub drive_through_share: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            university_share: 0.05,
            office_share: 0.25,
            drive_through_share: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub dataset_path: PathBuf,
    pub provinces_path: PathBuf,
    pub histogram_top_n: usize,
    pub thresholds: ClassifierThresholds,
    pub scraper_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_concurrent_provinces: usize,
}
