use eyre::{Result, WrapErr};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::markup::{self, attr_of, selector, text_of};
use crate::PageSource;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Product card found on a listing page
pub struct ProductSummary {
    /// Brand of the product
    pub brand: String,
    /// Name of the product
    pub title: String,
    /// Absolute URL to the product image
    pub img_url: String,
    /// Price as shown, without the trailing `.-`
    pub price: String,
    /// Link to the product's detail page, as found in the card
    #[serde(default)]
    pub detail_url: Option<String>,
}

impl ProductSummary {
    /// Price as a whole amount, e.g. `12,900` gives `12900`.
    pub fn price_amount(&self) -> Option<u64> {
        self.price.replace(',', "").trim().parse().ok()
    }
}

#[derive(Debug, Default)]
/// Product cards of one listing page, in page order.
///
/// Use `ProductListing::fetch` to scrape a listing page.
pub struct ProductListing {
    /// URL the listing was read from
    pub listing_url: String,
    /// Cards found on the page
    pub products: Vec<ProductSummary>,
}

impl ProductListing {
    /// Fetches the listing page at `url` and parses its product cards.
    ///
    /// Relative image paths are made absolute with `origin`.
    pub async fn fetch(source: &impl PageSource, url: &Url, origin: &Url) -> Result<Self> {
        let body = source
            .fetch_page(url)
            .await
            .wrap_err_with(|| format!("could not load listing {url}"))?;
        let mut listing = Self::parse(&body, origin)?;
        listing.listing_url = url.to_string();
        Ok(listing)
    }

    /// Parses the product cards out of a listing page body.
    pub fn parse(body: &str, origin: &Url) -> Result<Self> {
        let card_selector = &selector(markup::PRODUCT_CARD)?;
        let brand_selector = &selector(markup::BRAND)?;
        let title_selector = &selector(markup::TITLE)?;
        let img_selector = &selector(markup::IMAGE)?;
        let price_selector = &selector(markup::PRICE)?;
        let link_selector = &selector(markup::DETAIL_LINK)?;

        let document = Html::parse_document(body);
        let prefix = origin.as_str().trim_end_matches('/');

        let products = document
            .select(card_selector)
            .map(|card| {
                let img_url = attr_of(card, img_selector, "src")
                    .map(|src| {
                        if src.starts_with('/') {
                            String::from(prefix) + src
                        } else {
                            src.into()
                        }
                    })
                    .unwrap_or_default();
                let price = text_of(card, price_selector);
                let price = match price.strip_suffix(markup::PRICE_SUFFIX) {
                    Some(stripped) => stripped.trim_end().to_string(),
                    None => price,
                };

                ProductSummary {
                    brand: text_of(card, brand_selector),
                    title: text_of(card, title_selector),
                    img_url,
                    price,
                    detail_url: attr_of(card, link_selector, "href")
                        .filter(|href| !href.trim().is_empty())
                        .map(String::from),
                }
            })
            .collect::<Vec<_>>();
        debug!(cards = products.len(), "parsed listing");

        Ok(ProductListing {
            listing_url: String::new(),
            products,
        })
    }

    /// Number of product cards.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the page had no product cards.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl IntoIterator for ProductListing {
    type Item = ProductSummary;
    type IntoIter = std::vec::IntoIter<ProductSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}
