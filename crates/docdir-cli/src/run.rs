//! Per-city crawl runs.
//!
//! One listing walk per city, one profile aggregation per entry, records
//! written per city as soon as the city completes. Scrape-level failures
//! have already been degraded inside the scraper crate; the only errors
//! that surface here are local I/O ones.

use docdir_core::{CrawlConfig, Record, SearchTarget};
use docdir_scraper::{DirectoryClient, ListingWalker};

use crate::output;

pub async fn crawl(
    config: &CrawlConfig,
    targets: &[SearchTarget],
    combined: bool,
) -> anyhow::Result<()> {
    let client = DirectoryClient::from_config(config)?;
    let walker = ListingWalker::new(&client, config);

    let mut all_records: Vec<Record> = Vec::new();

    for target in targets {
        tracing::info!(city = %target.city, url = %target.listing_url, "crawling city");

        let entries = walker.walk(target).await;
        tracing::info!(city = %target.city, entries = entries.len(), "listing walk complete");

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            records.push(docdir_scraper::resolve_record(&client, entry).await);
        }

        let path = output::city_output_path(&config.output_dir, &target.city);
        output::write_records(&path, &records)?;
        tracing::info!(
            city = %target.city,
            records = records.len(),
            path = %path.display(),
            "city output written"
        );

        if combined {
            all_records.extend(records);
        }
    }

    if combined {
        let path = config.output_dir.join("all_cities.json");
        output::write_records(&path, &all_records)?;
        tracing::info!(
            records = all_records.len(),
            path = %path.display(),
            "consolidated output written"
        );
    }

    Ok(())
}
