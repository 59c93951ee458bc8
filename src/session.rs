use crate::fastmile::{
    self, ApnRecord, AvailableCellRecord, CarrierAggregationInfo, CellRecord, DeviceInfo,
    FastMileScraper, InterfaceTraffic, StatusReport,
};
use crate::{client, ScrapeError, Scraper, ScraperConfig, StatusPage};
use std::path::Path;
use tracing::warn;

/// Holds the most recently downloaded status page of one gateway.
///
/// Every getter reads the current page and fails with
/// [`ScrapeError::MissingDocument`] until [`StatusSession::download`] succeeded.
pub struct StatusSession {
    config: ScraperConfig,
    page: Option<StatusPage>,
}

impl StatusSession {
    pub fn new(config: ScraperConfig) -> Self {
        StatusSession { config, page: None }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Replaces the current page with a fresh download.
    pub async fn download(&mut self) -> Result<(), ScrapeError> {
        let html = client::fetch_html(&self.config).await?;
        self.load_html(&html);
        Ok(())
    }

    /// Uses a status page saved to disk instead of the live gateway.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ScrapeError> {
        let html = std::fs::read_to_string(path)?;
        self.load_html(&html);
        Ok(())
    }

    pub fn load_html(&mut self, html: &str) {
        let page = StatusPage::parse(html);
        if !FastMileScraper.can_be_scraped(&page) {
            warn!("Page from {} does not look like a status page", self.config.host);
        }
        self.page = Some(page);
    }

    pub fn page(&self) -> Result<&StatusPage, ScrapeError> {
        self.page.as_ref().ok_or(ScrapeError::MissingDocument)
    }

    pub fn device_info(&self) -> Result<DeviceInfo, ScrapeError> {
        fastmile::device_info(self.page()?)
    }

    pub fn apns(&self) -> Result<Vec<ApnRecord>, ScrapeError> {
        fastmile::apns(self.page()?)
    }

    pub fn interface_traffic(&self, name: &str) -> Result<InterfaceTraffic, ScrapeError> {
        fastmile::interface_traffic(self.page()?, name)
    }

    /// Traffic of the LTE interface since the last boot.
    pub fn lte_traffic(&self) -> Result<InterfaceTraffic, ScrapeError> {
        fastmile::lte_traffic(self.page()?)
    }

    /// Traffic of the Ethernet interface since the last boot.
    pub fn ethernet_traffic(&self) -> Result<InterfaceTraffic, ScrapeError> {
        fastmile::ethernet_traffic(self.page()?)
    }

    pub fn primary_cell(&self) -> Result<CellRecord, ScrapeError> {
        fastmile::primary_cell(self.page()?)
    }

    pub fn secondary_cells(&self) -> Result<Vec<CellRecord>, ScrapeError> {
        fastmile::secondary_cells(self.page()?)
    }

    /// Signal values of the last scan. Does not trigger a new measurement.
    pub fn available_cells(&self) -> Result<Vec<AvailableCellRecord>, ScrapeError> {
        fastmile::available_cells(self.page()?)
    }

    pub fn carrier_aggregation(&self) -> Result<CarrierAggregationInfo, ScrapeError> {
        fastmile::carrier_aggregation(self.page()?)
    }

    pub fn report(&self) -> Result<StatusReport, ScrapeError> {
        FastMileScraper.scrape(self.page()?)
    }
}
