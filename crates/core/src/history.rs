//! Score-change history
//!
//! A small bounded log of recent score gains, used by the game screen to show
//! fading `+N` entries under the score. It has no effect on game rules.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{
    MAX_SCORE_HISTORY_ENTRIES, MAX_VISIBLE_SCORE_CHANGES, SCORE_CHANGE_DISPLAY_MS,
    SCORE_FADE_MEDIUM_MS, SCORE_FADE_RECENT_MS,
};

/// One score gain and when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreChange {
    pub points: u64,
    pub at: Instant,
}

/// Display intensity of a score change, by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Recent,
    Medium,
    Old,
}

impl ScoreChange {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.at)
    }

    pub fn fade(&self, now: Instant) -> Fade {
        let age = self.age(now);
        if age < Duration::from_millis(SCORE_FADE_RECENT_MS) {
            Fade::Recent
        } else if age < Duration::from_millis(SCORE_FADE_MEDIUM_MS) {
            Fade::Medium
        } else {
            Fade::Old
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.age(now) < Duration::from_millis(SCORE_CHANGE_DISPLAY_MS)
    }
}

/// Bounded score-change log; pushing into a full log evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScoreHistory {
    entries: ArrayVec<ScoreChange, MAX_SCORE_HISTORY_ENTRIES>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, points: u64, at: Instant) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(ScoreChange { points, at });
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[ScoreChange] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries still on screen at `now`, newest first, at most `MAX_VISIBLE_SCORE_CHANGES`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &ScoreChange> {
        self.entries
            .iter()
            .rev()
            .filter(move |change| change.is_visible(now))
            .take(MAX_VISIBLE_SCORE_CHANGES)
    }
}
