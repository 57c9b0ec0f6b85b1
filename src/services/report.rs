use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::domain::Tournament;
use crate::fetchers::{TournamentFetcher, TournamentLister, pool};
use crate::http::RateLimitedClient;
use crate::rate_limiter::RateLimiter;
use crate::report::aggregate;
use crate::report::html::{self, ReportStats};

pub struct ReportService {
    config: AppConfig,
    client: RateLimitedClient,
}

impl ReportService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let rate_limiter = Arc::new(RateLimiter::per_second(config.scraper.requests_per_sec));
        let client = RateLimitedClient::new(
            config.scraper.user_agent,
            config.scraper.timeout_secs,
            rate_limiter,
        )?;

        Ok(Self { config, client })
    }

    pub async fn run(&self, card: &str) -> Result<()> {
        info!("=== Building meta report for \"{}\" ===\n", card);
        let started = Instant::now();

        // Step 1: List completed tournaments
        let lister = TournamentLister::new(self.client.clone(), &self.config.scraper);
        let tournaments = lister.list_completed().await?;
        let tournament_count = tournaments.len();

        // Step 2: Fetch standings and decklists through the worker pool
        let outcome = self.fetch_tournaments(tournaments).await;
        if outcome.skipped > 0 {
            info!("  → Skipped {} tournaments with fetch failures", outcome.skipped);
        }

        // Step 3: Filter, group and rank
        let decks_scanned = outcome.players.len();
        let groups = aggregate::aggregate(outcome.players, card, self.config.report.min_win_rate);

        // Step 4: Render and write the report
        let stats = ReportStats {
            tournaments: tournament_count,
            decks_scanned,
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        let document = html::render(card, &groups, &stats);
        let output_path = self.write_report(&document)?;

        self.log_summary(&stats, groups.match_count(), &output_path);

        // Step 5: Open in the default viewer; the report exists either way
        if let Err(error) = open::that(&output_path) {
            warn!("Failed to open report in viewer: {}", error);
        }

        Ok(())
    }

    async fn fetch_tournaments(&self, tournaments: Vec<Tournament>) -> pool::FetchOutcome {
        info!("Fetching standings and decklists...");

        let fetcher = Arc::new(TournamentFetcher::new(
            self.client.clone(),
            self.config.scraper.base_url,
        ));

        pool::fetch_all(
            tournaments,
            self.config.scraper.worker_count,
            move |tournament| {
                let fetcher = Arc::clone(&fetcher);
                async move { fetcher.fetch_players(&tournament).await }
            },
        )
        .await
    }

    fn write_report(&self, document: &str) -> Result<PathBuf> {
        let path = std::env::current_dir()
            .context("Failed to resolve working directory")?
            .join(self.config.report.output_file);

        std::fs::write(&path, document)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        Ok(path)
    }

    fn log_summary(&self, stats: &ReportStats, match_count: usize, output_path: &Path) {
        info!("Tournaments:  {}", stats.tournaments);
        info!("Decks:        {}", stats.decks_scanned);
        info!("Matches:      {}", match_count);
        info!("Elapsed:      {:.2}s", stats.elapsed_secs);
        info!("Output:       {}", output_path.display());
    }
}
