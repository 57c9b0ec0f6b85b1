use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use futures::future::join_all;
use log::info;
use scraper::Html;
use std::collections::HashSet;

use crate::config::settings::ScraperSettings;
use crate::domain::Tournament;
use crate::http::RateLimitedClient;
use crate::pagination;
use crate::parsers::listing;

/// Days in the trailing completion window
const WINDOW_DAYS: i64 = 28;

/// Discovers completed tournaments of the target format from the
/// site's listing pages.
pub struct TournamentLister {
    client: RateLimitedClient,
    base_url: String,
    format: String,
    list_url: String,
}

impl TournamentLister {
    pub fn new(client: RateLimitedClient, settings: &ScraperSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.to_string(),
            format: settings.format.to_string(),
            list_url: Self::build_list_url(settings),
        }
    }

    /// All completed tournaments in the trailing window.
    ///
    /// Any listing page failing is fatal: the listing defines the
    /// universe of work, so a partial one is not acceptable.
    pub async fn list_completed(&self) -> Result<Vec<Tournament>> {
        info!(
            "Listing completed {} tournaments ({}-day window)",
            self.format, WINDOW_DAYS
        );

        let first_page = self.fetch_listing_page(1).await?;
        let page_count = listing::max_page(&Html::parse_document(&first_page));

        let mut pages = vec![first_page];
        pages.extend(self.fetch_remaining_pages(page_count).await?);

        let tournaments = self.collect_tournaments(&pages);
        info!(
            "  → Found {} unique tournaments across {} listing pages",
            tournaments.len(),
            page_count
        );
        Ok(tournaments)
    }

    // --- HTTP Fetching ---

    async fn fetch_remaining_pages(&self, page_count: usize) -> Result<Vec<String>> {
        let fetches = (2..=page_count).map(|page| self.fetch_listing_page(page));
        join_all(fetches).await.into_iter().collect()
    }

    async fn fetch_listing_page(&self, page: usize) -> Result<String> {
        let url = pagination::build_paginated_url_with_params(&self.list_url, page);
        self.client
            .get_text(&url)
            .await
            .with_context(|| format!("Failed to fetch tournament listing page {}", page))
    }

    // --- Row Collection ---

    fn collect_tournaments(&self, pages: &[String]) -> Vec<Tournament> {
        let cutoff = Self::window_cutoff();
        let mut seen = HashSet::new();
        let mut tournaments = Vec::new();

        for page in pages {
            let html = Html::parse_document(page);
            for tournament in listing::extract_tournaments(&html, &self.base_url, &self.format) {
                if !Self::is_within_window(&tournament, cutoff) {
                    continue;
                }
                if seen.insert(tournament.id.clone()) {
                    tournaments.push(tournament);
                }
            }
        }

        tournaments
    }

    fn window_cutoff() -> NaiveDate {
        (Utc::now() - Duration::days(WINDOW_DAYS)).date_naive()
    }

    /// Rows without a parseable date are trusted to the site-side window filter.
    fn is_within_window(tournament: &Tournament, cutoff: NaiveDate) -> bool {
        tournament.date.map_or(true, |date| date >= cutoff)
    }

    // --- URL Building ---

    fn build_list_url(settings: &ScraperSettings) -> String {
        format!(
            "{}/tournaments/completed?game={}&format={}&platform=all&type=online&time={}&show={}",
            settings.base_url,
            settings.game,
            settings.format,
            settings.window,
            settings.page_size
        )
    }
}
