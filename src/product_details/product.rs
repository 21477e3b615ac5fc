use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::product_details::SpecificationTable;
use crate::{PageSource, ProductSummary};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of the catalog: a listing card plus its specifications.
pub struct Product {
    #[serde(flatten)]
    pub summary: ProductSummary,
    /// Specifications from the detail page.
    ///
    /// `None` when the detail page could not be fetched, or the card had no
    /// detail link. A fetched page without panels gives an empty table instead.
    pub specifications: Option<SpecificationTable>,
}

impl Product {
    /// Completes `summary` with the specifications behind its detail link.
    ///
    /// Failures are logged and leave `specifications` as `None`.
    pub async fn scrape(source: &impl PageSource, origin: &Url, summary: ProductSummary) -> Self {
        let specifications = match summary.detail_url.as_deref() {
            Some(href) => match origin.join(href) {
                Ok(url) => match SpecificationTable::fetch(source, &url).await {
                    Ok(table) => Some(table),
                    Err(e) => {
                        warn!(title = %summary.title, "could not scrape specifications: {e:#}");
                        None
                    }
                },
                Err(e) => {
                    warn!(title = %summary.title, href, "invalid detail link: {e}");
                    None
                }
            },
            None => {
                debug!(title = %summary.title, "no detail link, skipping specifications");
                None
            }
        };

        Product {
            summary,
            specifications,
        }
    }
}
