use anyhow::Result;
use futures::future::join_all;
use log::warn;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::domain::{FetchProgress, PlayerResult, Tournament};

/// Everything the worker pool produced for one run
pub struct FetchOutcome {
    pub players: Vec<PlayerResult>,
    pub completed: usize,
    pub skipped: usize,
}

/// Fetch every tournament through a fixed-size worker set pulling from
/// a shared queue.
///
/// A tournament whose fetch fails is skipped with a warning naming it
/// and never aborts its siblings. The pool bounds task count; request
/// throughput stays bounded by the rate limiter inside `fetch`.
pub async fn fetch_all<F, Fut>(
    tournaments: Vec<Tournament>,
    worker_count: usize,
    fetch: F,
) -> FetchOutcome
where
    F: Fn(Tournament) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<Vec<PlayerResult>>> + Send + 'static,
{
    let total = tournaments.len();
    let queue = Arc::new(Mutex::new(VecDeque::from(tournaments)));
    let progress = Arc::new(Mutex::new(FetchProgress::new(total)));

    let workers: Vec<_> = (0..worker_count.max(1))
        .map(|_| {
            let queue = Arc::clone(&queue);
            let progress = Arc::clone(&progress);
            let fetch = fetch.clone();
            tokio::spawn(run_worker(queue, progress, fetch))
        })
        .collect();

    let mut players = Vec::new();
    for handle in join_all(workers).await {
        match handle {
            Ok(worker_players) => players.extend(worker_players),
            Err(join_error) => warn!("Fetch worker panicked: {}", join_error),
        }
    }

    let skipped = progress
        .lock()
        .expect("progress lock poisoned")
        .skipped_count();

    FetchOutcome {
        players,
        completed: total - skipped,
        skipped,
    }
}

async fn run_worker<F, Fut>(
    queue: Arc<Mutex<VecDeque<Tournament>>>,
    progress: Arc<Mutex<FetchProgress>>,
    fetch: F,
) -> Vec<PlayerResult>
where
    F: Fn(Tournament) -> Fut,
    Fut: Future<Output = Result<Vec<PlayerResult>>>,
{
    let mut players = Vec::new();

    while let Some(tournament) = next_tournament(&queue) {
        match fetch(tournament.clone()).await {
            Ok(mut results) => {
                players.append(&mut results);
                lock_progress(&progress).increment_fetched();
            }
            Err(error) => {
                warn!("Skipping tournament {}: {:#}", tournament.id, error);
                lock_progress(&progress).increment_skipped();
            }
        }
    }

    players
}

fn next_tournament(queue: &Mutex<VecDeque<Tournament>>) -> Option<Tournament> {
    queue.lock().expect("queue lock poisoned").pop_front()
}

fn lock_progress(progress: &Mutex<FetchProgress>) -> std::sync::MutexGuard<'_, FetchProgress> {
    progress.lock().expect("progress lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(id: &str) -> Tournament {
        Tournament {
            id: id.to_string(),
            name: id.to_string(),
            date: None,
            format: "STANDARD".to_string(),
            standings_url: format!("https://example.com/tournament/{}/standings", id),
        }
    }

    fn player_for(tournament: &Tournament) -> PlayerResult {
        PlayerResult {
            tournament_id: tournament.id.clone(),
            player: "Player".to_string(),
            archetype: "Other".to_string(),
            wins: 3,
            losses: 1,
            ties: 0,
            points: 9,
            dropped: false,
            decklist: vec!["Charizard ex".to_string()],
            deck_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_failed_tournament_is_skipped_without_aborting_siblings() {
        let tournaments = vec![tournament("alpha"), tournament("broken"), tournament("gamma")];

        let outcome = fetch_all(tournaments, 2, |tournament: Tournament| async move {
            if tournament.id == "broken" {
                anyhow::bail!("standings page returned 500");
            }
            Ok(vec![player_for(&tournament)])
        })
        .await;

        assert_eq!(outcome.completed, 2);
        assert_eq!(outcome.skipped, 1);

        let mut ids: Vec<_> = outcome
            .players
            .iter()
            .map(|player| player.tournament_id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["alpha", "gamma"]);
    }

    #[tokio::test]
    async fn test_single_worker_drains_the_whole_queue() {
        let tournaments = vec![tournament("a"), tournament("b"), tournament("c")];

        let outcome = fetch_all(tournaments, 1, |tournament: Tournament| async move {
            Ok(vec![player_for(&tournament)])
        })
        .await;

        assert_eq!(outcome.completed, 3);
        assert_eq!(outcome.players.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_queue_produces_empty_outcome() {
        let outcome = fetch_all(Vec::new(), 4, |_tournament: Tournament| async move {
            Ok(Vec::new())
        })
        .await;

        assert_eq!(outcome.completed, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.players.is_empty());
    }
}
