//! Scrape JIB product listings together with each product's
//! specification table.
//!
//! `ProductListing` fetches the summary cards of a listing page,
//! `SpecificationTable` fetches the grouped specifications of one
//! product page and `run` ties both together into a JSON catalog.

mod catalog;
mod config;
mod listing;
mod markup;
mod pipeline;
mod product_details;
mod source;

use eyre::{Result, WrapErr};
use header::{HeaderMap, HeaderValue};
use reqwest::header;

pub use catalog::{load_catalog, write_catalog};
pub use config::{ScrapeConfig, DEFAULT_CATEGORY, LISTING_PATH, SITE_ORIGIN};
pub use listing::{ProductListing, ProductSummary};
pub use pipeline::{run, RunReport};
pub use product_details::{Product, Specification, SpecificationTable, Specifications};
pub use source::{HttpSource, PageSource};
pub use url::Url;

/// Builds the browser-like headers sent with every request.
///
/// The referer points at the site root so requests look like
/// in-site navigation.
fn build_headers(origin: &Url) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("th,en-US;q=0.7,en;q=0.3"),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static("gzip, deflate, br"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let referer = origin
        .join("/")
        .wrap_err_with(|| format!("cannot build referer from {origin}"))?;
    headers.insert(
        header::REFERER,
        HeaderValue::from_str(referer.as_str()).wrap_err("referer is not a valid header value")?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_mimic_a_browser() {
        let origin = Url::parse(SITE_ORIGIN).unwrap();
        let headers = build_headers(&origin).unwrap();

        assert!(headers[header::USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("Mozilla/5.0"));
        assert_eq!(headers[header::ACCEPT_ENCODING], "gzip, deflate, br");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
        assert_eq!(headers[header::REFERER], "https://www.jib.co.th/");
        assert_eq!(headers.len(), 6);
    }
}
