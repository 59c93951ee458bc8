use crate::{ScrapeError, ScraperConfig, StatusPage};
use reqwest::StatusCode;
use tracing::{debug, info};

/// Downloads the status page once.
///
/// The gateway only answers over HTTPS with a self-signed certificate, so
/// certificate validation is disabled for this client.
pub async fn fetch_html(config: &ScraperConfig) -> Result<String, ScrapeError> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(config.timeout)
        .build()?;

    let url = config.status_url();
    debug!("Visit {}", url);
    let response = client.get(&url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ScrapeError::Connection {
            status: Some(status.as_u16()),
            source: None,
        });
    }

    let html = response.text().await?;
    info!("Downloaded {} ({} bytes)", url, html.len());
    Ok(html)
}

pub async fn fetch_document(config: &ScraperConfig) -> Result<StatusPage, ScrapeError> {
    let html = fetch_html(config).await?;
    Ok(StatusPage::parse(&html))
}
