pub mod client;
pub mod fastmile;
pub mod page;

mod config;
mod error;
mod parse;
mod session;

pub use config::{ScraperConfig, DEFAULT_HOST, DEFAULT_TIMEOUT};
pub use error::{error_chain, ScrapeError};
pub use page::{Anchor, StatusPage};
pub use parse::{parse_band_list, parse_int, parse_ip, parse_used_data};
pub use session::StatusSession;

/// Turns one parsed page into a report.
pub trait Scraper {
    type Report: std::fmt::Debug;

    fn can_be_scraped(&self, page: &StatusPage) -> bool;
    fn scrape(&self, page: &StatusPage) -> Result<Self::Report, ScrapeError>;
}
