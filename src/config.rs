use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr};
use url::Url;

/// Origin of the retailer; relative image and detail links resolve against it.
pub const SITE_ORIGIN: &str = "https://www.jib.co.th";
/// Path under the origin serving the PC-builder product fragments.
pub const LISTING_PATH: &str = "/web/pcsetspec/load_product/";
/// Category scraped when none is given.
pub const DEFAULT_CATEGORY: &str = "vga";
/// Pause before every detail request.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Everything one scrape run needs to know.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site origin used for the referer header and for relative links.
    pub origin: Url,
    /// Listing page to scrape.
    pub listing_url: Url,
    /// JSON file the catalog is written to.
    pub output: PathBuf,
    /// Fixed delay awaited before each detail fetch.
    pub delay: Duration,
}

impl ScrapeConfig {
    /// Config for one hardware category of the PC builder, e.g. `vga` or `cpu`.
    ///
    /// The catalog is written to `<category>.json`.
    pub fn for_category(origin: &str, category: &str) -> Result<Self> {
        let origin = Url::parse(origin).wrap_err_with(|| format!("invalid origin `{origin}`"))?;
        let listing_url = listing_url(&origin, category)?;
        Ok(ScrapeConfig {
            origin,
            listing_url,
            output: PathBuf::from(format!("{category}.json")),
            delay: DEFAULT_DELAY,
        })
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        let origin = Url::parse(SITE_ORIGIN).expect("SITE_ORIGIN is a valid url");
        let listing_url = listing_url(&origin, DEFAULT_CATEGORY).expect("default listing url");
        ScrapeConfig {
            origin,
            listing_url,
            output: PathBuf::from(format!("{DEFAULT_CATEGORY}.json")),
            delay: DEFAULT_DELAY,
        }
    }
}

fn listing_url(origin: &Url, category: &str) -> Result<Url> {
    origin
        .join(&format!("{LISTING_PATH}{category}"))
        .wrap_err_with(|| format!("invalid category `{category}`"))
}
