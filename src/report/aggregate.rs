use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{MatchedResult, PlayerResult};

/// Matched results grouped by archetype, ranked within each group.
/// Iteration visits archetypes in label order.
pub struct ArchetypeGroups {
    groups: BTreeMap<String, Vec<MatchedResult>>,
}

impl ArchetypeGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchedResult])> {
        self.groups
            .iter()
            .map(|(label, results)| (label.as_str(), results.as_slice()))
    }

    pub fn match_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build the ranked archetype groups for one card query.
///
/// Keeps results playing the card, with a defined win rate at or above
/// the threshold; groups by archetype; ranks each group by win rate,
/// then games played, then encounter order.
pub fn aggregate(results: Vec<PlayerResult>, card: &str, min_win_rate: f64) -> ArchetypeGroups {
    let mut groups: BTreeMap<String, Vec<MatchedResult>> = BTreeMap::new();

    for matched in matched_results(results, card, min_win_rate) {
        groups
            .entry(matched.result.archetype.clone())
            .or_default()
            .push(matched);
    }

    for group in groups.values_mut() {
        sort_by_rank(group);
    }

    ArchetypeGroups { groups }
}

fn matched_results(
    results: Vec<PlayerResult>,
    card: &str,
    min_win_rate: f64,
) -> impl Iterator<Item = MatchedResult> {
    results
        .into_iter()
        .filter(move |result| result.plays_card(card))
        .filter_map(MatchedResult::from_result)
        .filter(move |matched| matched.win_rate >= min_win_rate)
}

fn sort_by_rank(group: &mut [MatchedResult]) {
    group.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(Ordering::Equal)
            .then(b.games_played.cmp(&a.games_played))
    });
}
