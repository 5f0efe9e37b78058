//! Best score and recent top runs
//!
//! Read once at startup, written at game over. Persisted to LocalStorage on web.

use serde::{Deserialize, Serialize};

use crate::platform::ScoreReporter;

/// Maximum number of runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    /// All-time best (survives board trimming)
    pub best: u64,
    /// Top runs, sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dash_runner_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    ///
    /// The stored best becomes `max(previous, score)`.
    pub fn record(&mut self, score: u64, timestamp: f64) -> bool {
        let new_best = score > self.best;
        self.best = self.best.max(score);

        if score > 0 {
            let pos = self
                .entries
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(self.entries.len());
            if pos < MAX_HIGH_SCORES {
                self.entries.insert(pos, HighScoreEntry { score, timestamp });
                self.entries.truncate(MAX_HIGH_SCORES);
            }
        }

        new_best
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        (self.best > 0).then_some(self.best)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded high scores (best {})", scores.best);
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved (best {})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl ScoreReporter for HighScores {
    fn report_game_over(&mut self, final_score: u64) {
        if self.record(final_score, now_ms()) {
            log::info!("New best score: {}", final_score);
        }
        self.save();
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_max_of_runs() {
        let mut scores = HighScores::new();
        assert!(scores.record(120, 1.0));
        assert!(!scores.record(80, 2.0));
        assert_eq!(scores.best, 120);
        assert!(scores.record(300, 3.0));
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_board_sorted_and_trimmed() {
        let mut scores = HighScores::new();
        for i in 1..=15u64 {
            scores.record(i * 10, i as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries[0].score, 150);
        assert_eq!(scores.entries.last().unwrap().score, 60);
        assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));

        // Too low for a full board, but best is untouched
        scores.record(5, 99.0);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best, 150);
    }

    #[test]
    fn test_zero_score_not_listed() {
        let mut scores = HighScores::new();
        assert!(!scores.record(0, 1.0));
        assert!(scores.entries.is_empty());
        assert_eq!(scores.top_score(), None);
    }

    #[test]
    fn test_reporter_records() {
        let mut scores = HighScores::new();
        scores.report_game_over(42);
        assert_eq!(scores.best, 42);
        assert_eq!(scores.entries.len(), 1);
    }
}
