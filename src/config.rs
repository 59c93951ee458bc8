use std::time::Duration;

pub const DEFAULT_HOST: &str = "192.168.0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// IP address or hostname of the gateway.
    pub host: String,
    /// Timeout of the whole status page request.
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScraperConfig {
    pub fn new<H: Into<String>>(host: H, timeout: Duration) -> Self {
        ScraperConfig {
            host: host.into(),
            timeout,
        }
    }

    pub fn status_url(&self) -> String {
        format!("https://{}/status.php", self.host)
    }
}
