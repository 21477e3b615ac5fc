use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::{write_catalog, PageSource, Product, ProductListing, ScrapeConfig};

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of products written to the catalog.
    pub processed: usize,
    /// Where the catalog was written.
    pub output: PathBuf,
}

/// Scrapes the configured listing and every product behind it, then writes
/// the catalog.
///
/// Products are handled one at a time, each detail request preceded by
/// `config.delay`. Failures are logged, never returned: a listing that
/// cannot be loaded gives an empty catalog, and a catalog that cannot be
/// written is reported as zero products processed.
pub async fn run(source: &impl PageSource, config: &ScrapeConfig) -> RunReport {
    let summaries =
        match ProductListing::fetch(source, &config.listing_url, &config.origin).await {
            Ok(listing) => {
                info!(url = %listing.listing_url, cards = listing.len(), "loaded listing");
                listing
            }
            Err(e) => {
                warn!(url = %config.listing_url, "listing failed, nothing to scrape: {e:#}");
                ProductListing::default()
            }
        };

    let mut catalog = Vec::with_capacity(summaries.len());
    for summary in summaries {
        tokio::time::sleep(config.delay).await;
        let product = Product::scrape(source, &config.origin, summary).await;
        info!(
            title = %product.summary.title,
            with_specifications = product.specifications.is_some(),
            "scraped product"
        );
        catalog.push(product);
    }

    let processed = match write_catalog(&config.output, &catalog) {
        Ok(()) => {
            info!(path = %config.output.display(), products = catalog.len(), "saved catalog");
            catalog.len()
        }
        Err(e) => {
            error!(path = %config.output.display(), "could not save catalog: {e:#}");
            0
        }
    };

    RunReport {
        processed,
        output: config.output.clone(),
    }
}
