//! The listing walk: direct pagination or district partitioning.
//!
//! A listing whose page count stays at or under the threshold is paged
//! through directly. Beyond the threshold the site caps pagination depth,
//! so the walk falls back to partitioning by district: batches of district
//! keys filter the listing into smaller result sets, each paged through on
//! its own.

use docdir_core::{CrawlConfig, District, ListingEntry, SearchTarget};
use scraper::Html;

use crate::client::DirectoryClient;
use crate::districts;
use crate::extract;
use crate::pagination;

pub struct ListingWalker<'a> {
    client: &'a DirectoryClient,
    page_threshold: u32,
    district_batch_size: usize,
}

impl<'a> ListingWalker<'a> {
    #[must_use]
    pub fn new(client: &'a DirectoryClient, config: &CrawlConfig) -> Self {
        Self {
            client,
            page_threshold: config.page_threshold,
            district_batch_size: config.district_batch_size.max(1),
        }
    }

    /// Walks one search target and returns its listing entries in
    /// discovery order.
    ///
    /// Pages within a walk ascend; no order is guaranteed across district
    /// batches. A page that fails to fetch contributes zero entries and
    /// never halts the walk.
    pub async fn walk(&self, target: &SearchTarget) -> Vec<ListingEntry> {
        let total = pagination::count_pages(self.client, &target.listing_url).await;
        tracing::info!(city = %target.city, total, "starting listing walk");

        if total <= self.page_threshold {
            return self
                .walk_pages(&target.listing_url, total, &target.city)
                .await;
        }

        self.walk_partitioned(target, total).await
    }

    /// District partitioning for listings too deep to page through.
    ///
    /// A batch whose own filtered listing still exceeds the threshold is
    /// walked directly anyway — per-batch result counts are assumed to fit
    /// in practice, and re-partitioning is deliberately not attempted.
    async fn walk_partitioned(&self, target: &SearchTarget, total: u32) -> Vec<ListingEntry> {
        tracing::info!(
            city = %target.city,
            total,
            threshold = self.page_threshold,
            "listing exceeds pagination depth — partitioning by district"
        );

        let districts = districts::list_districts(self.client, &target.listing_url).await;
        if districts.is_empty() {
            tracing::error!(
                city = %target.city,
                url = %target.listing_url,
                "no districts available — cannot partition, reporting zero entries"
            );
            return Vec::new();
        }

        let mut entries = Vec::new();
        for (index, batch) in districts.chunks(self.district_batch_size).enumerate() {
            entries.extend(self.walk_batch(target, index, batch).await);
        }
        entries
    }

    async fn walk_batch(
        &self,
        target: &SearchTarget,
        index: usize,
        batch: &[District],
    ) -> Vec<ListingEntry> {
        let filtered_url = match districts::district_filter_url(&target.listing_url, batch) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(city = %target.city, batch = index, error = %err, "cannot build filtered listing URL");
                return Vec::new();
            }
        };

        let batch_total = pagination::count_pages(self.client, &filtered_url).await;
        tracing::info!(
            city = %target.city,
            batch = index,
            districts = batch.len(),
            pages = batch_total,
            "walking district batch"
        );
        self.walk_pages(&filtered_url, batch_total, &target.city).await
    }

    /// Visits pages `1..=total` of `base_url` in ascending order.
    async fn walk_pages(&self, base_url: &str, total: u32, city: &str) -> Vec<ListingEntry> {
        let mut entries = Vec::new();

        for page in 1..=total {
            let url = match pagination::page_url(base_url, page) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(city, page, error = %err, "cannot build page URL");
                    continue;
                }
            };

            self.client.polite_delay().await;
            let page_entries = self.scrape_page(&url, city).await;
            tracing::info!(city, page, total, found = page_entries.len(), "listing page scraped");
            entries.extend(page_entries);
        }

        entries
    }

    /// One page fetch plus extraction; a failed fetch yields zero entries.
    async fn scrape_page(&self, url: &str, city: &str) -> Vec<ListingEntry> {
        match self.client.fetch_html(url).await {
            Ok(body) => entries_from_body(&body, city),
            Err(err) => {
                tracing::warn!(url, city, error = %err, "listing page fetch failed — skipping");
                Vec::new()
            }
        }
    }
}

fn entries_from_body(body: &str, city: &str) -> Vec<ListingEntry> {
    let doc = Html::parse_document(body);
    extract::listing_entries(&doc, city)
}
