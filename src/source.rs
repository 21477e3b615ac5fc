use eyre::{Result, WrapErr};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Something that can hand back the HTML body of a page.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches `url` and returns its body. Non-2xx responses are errors.
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// `PageSource` backed by a reqwest client carrying the browser headers.
///
/// No timeout is configured, a stalled server stalls the caller.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Builds a client whose referer points at `origin`.
    pub fn new(origin: &Url) -> Result<Self> {
        let client = Client::builder()
            .default_headers(crate::build_headers(origin)?)
            .build()?;
        Ok(HttpSource { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let webpage = self
            .client
            .get(url.to_owned())
            .send()
            .await
            .wrap_err_with(|| format!("request to {url} failed"))?
            .error_for_status()?;
        debug!(%url, status = %webpage.status(), "fetched page");
        let body = webpage.text().await?;
        Ok(body)
    }
}
