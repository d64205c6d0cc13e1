//! Match-grained ELO ratings with atomic persistence.
//!
//! [`EloBook`] is the pure rating math; [`EloService`] wraps it in a single
//! writer lock and persists the whole record set to a JSON file via a
//! temp-file rename after every committed match. Readers get point-in-time
//! snapshots. Only match outcomes move ratings; hand outcomes never do.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RATING: i32 = 1500;

/// K-factor tiers by games already played: new players move fast,
/// established players stabilize.
const K_NEW_PLAYER: i32 = 40;
const K_NORMAL: i32 = 20;
const K_ESTABLISHED: i32 = 10;

const PERSIST_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EloRating {
    pub model: String,
    pub rating: i32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl EloRating {
    fn fresh(model: &str) -> Self {
        Self {
            model: model.to_string(),
            rating: DEFAULT_RATING,
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }
}

/// The pure rating state: no locking, no I/O.
#[derive(Debug, Default)]
pub struct EloBook {
    ratings: HashMap<String, EloRating>,
}

impl EloBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<EloRating>) -> Self {
        Self {
            ratings: records
                .into_iter()
                .map(|r| (r.model.clone(), r))
                .collect(),
        }
    }

    pub fn rating(&mut self, model: &str) -> &EloRating {
        self.ratings
            .entry(model.to_string())
            .or_insert_with(|| EloRating::fresh(model))
    }

    /// Expected score of `a` against `b` under the logistic ELO curve.
    pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
        1.0 / (1.0 + 10f64.powf((rating_b - rating_a) as f64 / 400.0))
    }

    fn k_factor(games_played: u32) -> i32 {
        if games_played < 30 {
            K_NEW_PLAYER
        } else if games_played < 100 {
            K_NORMAL
        } else {
            K_ESTABLISHED
        }
    }

    /// Apply one match result and return the new `(winner, loser)` ratings.
    /// On a draw the argument order is arbitrary. K-factors use each
    /// player's pre-match game count.
    pub fn record_result(&mut self, winner: &str, loser: &str, draw: bool) -> (i32, i32) {
        let winner_before = self.rating(winner).clone();
        let loser_before = self.rating(loser).clone();

        let expected_winner = Self::expected_score(winner_before.rating, loser_before.rating);
        let expected_loser = 1.0 - expected_winner;
        let (score_winner, score_loser) = if draw { (0.5, 0.5) } else { (1.0, 0.0) };

        let k_winner = Self::k_factor(winner_before.games_played) as f64;
        let k_loser = Self::k_factor(loser_before.games_played) as f64;

        let winner_new =
            (winner_before.rating as f64 + k_winner * (score_winner - expected_winner)).round()
                as i32;
        let loser_new =
            (loser_before.rating as f64 + k_loser * (score_loser - expected_loser)).round() as i32;

        {
            let entry = self.ratings.get_mut(winner).expect("winner entry exists");
            entry.rating = winner_new;
            entry.games_played += 1;
            if draw {
                entry.draws += 1;
            } else {
                entry.wins += 1;
            }
        }
        {
            let entry = self.ratings.get_mut(loser).expect("loser entry exists");
            entry.rating = loser_new;
            entry.games_played += 1;
            if draw {
                entry.draws += 1;
            } else {
                entry.losses += 1;
            }
        }
        (winner_new, loser_new)
    }

    /// Probability that `model_a` beats `model_b` at current ratings.
    pub fn win_probability(&mut self, model_a: &str, model_b: &str) -> f64 {
        let a = self.rating(model_a).rating;
        let b = self.rating(model_b).rating;
        Self::expected_score(a, b)
    }

    /// All ratings, best first; ties broken by model name for stable output.
    pub fn leaderboard(&self) -> Vec<EloRating> {
        let mut all: Vec<EloRating> = self.ratings.values().cloned().collect();
        all.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.model.cmp(&b.model)));
        all
    }

    pub fn export(&self) -> Vec<EloRating> {
        self.leaderboard()
    }
}

/// Thread-safe rating service with file persistence.
///
/// All writes serialize through one lock; persistence rewrites the whole
/// record set atomically (write temp, rename) and retries with backoff.
/// If the file cannot be written the in-memory book is preserved, a warning
/// is logged, and the match result still stands.
pub struct EloService {
    book: Mutex<EloBook>,
    path: Option<PathBuf>,
}

impl EloService {
    /// In-memory only, for tests and one-shot runs.
    pub fn ephemeral() -> Self {
        Self {
            book: Mutex::new(EloBook::new()),
            path: None,
        }
    }

    /// Backed by a JSON file; existing records are loaded when present.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let book = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<EloRating>>(&contents) {
                Ok(records) => EloBook::from_records(records),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "rating file unreadable, starting fresh");
                    EloBook::new()
                }
            },
            Err(_) => EloBook::new(),
        };
        Self {
            book: Mutex::new(book),
            path: Some(path),
        }
    }

    /// Record a decisive match.
    pub fn record_match(&self, winner: &str, loser: &str) -> (i32, i32) {
        self.record(winner, loser, false)
    }

    /// Record a drawn match.
    pub fn record_draw(&self, model_a: &str, model_b: &str) -> (i32, i32) {
        self.record(model_a, model_b, true)
    }

    fn record(&self, winner: &str, loser: &str, draw: bool) -> (i32, i32) {
        let mut book = self.book.lock().unwrap();
        let result = book.record_result(winner, loser, draw);
        if let Some(path) = &self.path {
            Self::persist_with_retry(path, &book.export());
        }
        tracing::info!(winner, loser, draw, new_winner = result.0, new_loser = result.1, "ratings updated");
        result
    }

    pub fn rating_of(&self, model: &str) -> EloRating {
        self.book.lock().unwrap().rating(model).clone()
    }

    pub fn win_probability(&self, model_a: &str, model_b: &str) -> f64 {
        self.book.lock().unwrap().win_probability(model_a, model_b)
    }

    /// Point-in-time snapshot, best first.
    pub fn leaderboard(&self) -> Vec<EloRating> {
        self.book.lock().unwrap().leaderboard()
    }

    fn persist_with_retry(path: &Path, records: &[EloRating]) {
        let mut backoff = Duration::from_millis(50);
        for attempt in 1..=PERSIST_ATTEMPTS {
            match Self::write_atomic(path, records) {
                Ok(()) => return,
                Err(e) if attempt == PERSIST_ATTEMPTS => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "rating persistence failed; ratings kept in memory"
                    );
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "rating write failed, retrying");
                    std::thread::sleep(backoff);
                    backoff *= 2;
                }
            }
        }
    }

    /// Whole-file rewrite through a sibling temp file and rename.
    fn write_atomic(path: &Path, records: &[EloRating]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        {
            let mut f = std::fs::File::create(&tmp)?;
            let body = serde_json::to_string_pretty(records).map_err(std::io::Error::other)?;
            f.write_all(body.as_bytes())?;
            f.flush()?;
        }
        std::fs::rename(&tmp, path)
    }
}
