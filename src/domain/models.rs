use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A completed tournament discovered on the listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub format: String,
    pub standings_url: String,
}

/// One player's finish in one tournament
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResult {
    pub tournament_id: String,
    pub player: String,
    pub archetype: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points: u32,
    pub dropped: bool,
    pub decklist: Vec<String>,
    pub deck_url: String,
}

impl PlayerResult {
    pub fn decisive_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Win percentage over decisive games. Ties count in neither the
    /// numerator nor the denominator; undefined when every game tied.
    pub fn win_rate(&self) -> Option<f64> {
        let decisive = self.decisive_games();
        if decisive == 0 {
            return None;
        }
        Some(f64::from(self.wins) / f64::from(decisive))
    }

    /// Record string as shown in the report, e.g. "5-2-1" or "0-2-0 Drop".
    pub fn record(&self) -> String {
        let record = format!("{}-{}-{}", self.wins, self.losses, self.ties);
        if self.dropped {
            format!("{record} Drop")
        } else {
            record
        }
    }

    /// True if any decklist entry contains the card name, case-insensitively.
    pub fn plays_card(&self, card: &str) -> bool {
        let needle = card.trim().to_lowercase();
        self.decklist
            .iter()
            .any(|entry| entry.to_lowercase().contains(&needle))
    }
}

/// A player result that matched the card query, with its ranking keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedResult {
    pub result: PlayerResult,
    pub win_rate: f64,
    pub games_played: u32,
}

impl MatchedResult {
    /// None when the record has no decisive games: the win rate is
    /// undefined there and the player stays out of the ranking.
    pub fn from_result(result: PlayerResult) -> Option<Self> {
        let win_rate = result.win_rate()?;
        let games_played = result.games_played();

        Some(Self {
            result,
            win_rate,
            games_played,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_result(wins: u32, losses: u32, ties: u32, dropped: bool) -> PlayerResult {
        PlayerResult {
            tournament_id: "regional-test".to_string(),
            player: "Test Player".to_string(),
            archetype: "Charizard ex".to_string(),
            wins,
            losses,
            ties,
            points: wins * 3 + ties,
            dropped,
            decklist: vec![
                "Charizard ex".to_string(),
                "Basic Fire Energy".to_string(),
            ],
            deck_url: String::new(),
        }
    }

    #[test]
    fn test_card_match_is_case_insensitive_substring() {
        let result = player_result(3, 1, 0, false);

        assert!(result.plays_card("charizard"));
        assert!(result.plays_card("CHARIZARD EX"));
        assert!(result.plays_card("fire energy"));
        assert!(!result.plays_card("pikachu"));
    }

    #[test]
    fn test_win_rate_excludes_ties() {
        let result = player_result(3, 1, 2, false);

        assert_eq!(result.win_rate(), Some(0.75));
        assert_eq!(result.games_played(), 6);
    }

    #[test]
    fn test_win_rate_undefined_without_decisive_games() {
        let all_ties = player_result(0, 0, 3, false);

        assert_eq!(all_ties.win_rate(), None);
        assert!(MatchedResult::from_result(all_ties).is_none());
    }

    #[test]
    fn test_dropped_record_string() {
        let result = player_result(0, 2, 0, true);

        assert_eq!(result.record(), "0-2-0 Drop");
    }

    #[test]
    fn test_regular_record_string() {
        let result = player_result(5, 2, 1, false);

        assert_eq!(result.record(), "5-2-1");
    }
}
