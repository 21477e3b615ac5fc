use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eyre::{Result, WrapErr};
use jib_scraper::{HttpSource, ScrapeConfig, Url, DEFAULT_CATEGORY, SITE_ORIGIN};

#[derive(Parser)]
#[command(name = "jib_scraper", about = "Scrape a JIB product listing and its specifications to JSON")]
struct Cli {
    /// PC-builder category to scrape (vga, cpu, ram, ...)
    #[arg(short, long, default_value = DEFAULT_CATEGORY)]
    category: String,
    /// Listing URL to scrape instead of the category page
    #[arg(long)]
    url: Option<String>,
    /// Site origin for relative links and the referer header
    #[arg(long, default_value = SITE_ORIGIN)]
    origin: String,
    /// Output file (default: <category>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pause before each detail request, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
}

impl Cli {
    fn into_config(self) -> Result<ScrapeConfig> {
        let mut config = ScrapeConfig::for_category(&self.origin, &self.category)?;
        if let Some(url) = self.url {
            config.listing_url =
                Url::parse(&url).wrap_err_with(|| format!("invalid listing url `{url}`"))?;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.delay = Duration::from_millis(self.delay_ms);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let source = HttpSource::new(&config.origin)?;
    let report = jib_scraper::run(&source, &config).await;

    println!(
        "Scraped {} products into {}",
        report.processed,
        report.output.display()
    );
    Ok(())
}
