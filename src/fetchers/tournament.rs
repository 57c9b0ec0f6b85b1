use anyhow::{Context, Result};
use futures::future::join_all;
use log::warn;
use scraper::Html;

use crate::domain::{PlayerResult, Tournament};
use crate::http::RateLimitedClient;
use crate::parsers::{decklist, standings};

/// Fetches one tournament's standings and per-player decklists
pub struct TournamentFetcher {
    client: RateLimitedClient,
    base_url: String,
}

impl TournamentFetcher {
    pub fn new(client: RateLimitedClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Full set of player results for one tournament.
    ///
    /// The standings fetch is the tournament's point of failure; a
    /// decklist page failing afterwards only drops that one player.
    /// Deck fetches run concurrently, throttled by the shared limiter.
    pub async fn fetch_players(&self, tournament: &Tournament) -> Result<Vec<PlayerResult>> {
        let standings_page = self
            .client
            .get_text(&tournament.standings_url)
            .await
            .with_context(|| format!("Failed to fetch standings for {}", tournament.id))?;

        let deck_links =
            standings::extract_deck_links(&Html::parse_document(&standings_page), &self.base_url);

        let fetches = deck_links
            .iter()
            .map(|deck_url| self.fetch_player(tournament, deck_url));
        let results = join_all(fetches).await;

        Ok(results.into_iter().flatten().collect())
    }

    async fn fetch_player(&self, tournament: &Tournament, deck_url: &str) -> Option<PlayerResult> {
        let page = match self.client.get_text(deck_url).await {
            Ok(page) => page,
            Err(error) => {
                warn!("Discarding deck page {}: {}", deck_url, error);
                return None;
            }
        };

        Some(Self::parse_player(tournament, deck_url, &page))
    }

    fn parse_player(tournament: &Tournament, deck_url: &str, page: &str) -> PlayerResult {
        let html = Html::parse_document(page);
        let details = decklist::extract_details(&html);

        PlayerResult {
            tournament_id: tournament.id.clone(),
            player: standings::player_name_from_url(deck_url),
            archetype: decklist::extract_archetype(&html),
            wins: details.wins,
            losses: details.losses,
            ties: details.ties,
            points: details.points,
            dropped: details.dropped,
            decklist: decklist::extract_card_names(&html, page),
            deck_url: deck_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tournament() -> Tournament {
        Tournament {
            id: "weekly-42".to_string(),
            name: "Weekly #42".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 7, 21),
            format: "STANDARD".to_string(),
            standings_url: "https://example.com/tournament/weekly-42/standings".to_string(),
        }
    }

    #[test]
    fn test_parse_player_builds_full_result() {
        let page = r#"
            <html><body>
                <div class="deck" data-tooltip="Charizard ex"></div>
                <div class="details">15 points (5-1-1)</div>
                <div class="decklist">
                    <a href="/card/1">Charizard ex</a>
                    <a href="/card/2">Basic Fire Energy</a>
                </div>
            </body></html>
        "#;
        let deck_url = "https://example.com/tournament/weekly-42/player/ash-ketchum/decklist";

        let result = TournamentFetcher::parse_player(&tournament(), deck_url, page);

        assert_eq!(result.tournament_id, "weekly-42");
        assert_eq!(result.player, "Ash Ketchum");
        assert_eq!(result.archetype, "Charizard ex");
        assert_eq!((result.wins, result.losses, result.ties), (5, 1, 1));
        assert_eq!(result.points, 15);
        assert!(!result.dropped);
        assert!(result.plays_card("charizard"));
    }

    #[test]
    fn test_parse_player_tolerates_bare_page() {
        let page = "<html><body><p>maintenance</p></body></html>";
        let deck_url = "https://example.com/tournament/weekly-42/player/misty/decklist";

        let result = TournamentFetcher::parse_player(&tournament(), deck_url, page);

        assert_eq!(result.player, "Misty");
        assert_eq!(result.archetype, "Other");
        assert_eq!(result.games_played(), 0);
        assert!(result.decklist.is_empty());
    }
}
