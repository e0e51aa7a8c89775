//! Score and combo-streak state machine.
//!
//! Collectibles add `base + floor(base * combo * bonus_factor)` and extend
//! the streak; hazards break it. A streak with no scoring event inside the
//! idle window expires on its own. The combo never goes negative: it is an
//! unsigned counter that only resets to zero.

/// Accumulated scoring state for one arcade session.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    score: i64,
    combo: u32,
    max_combo: u32,
    /// Session-relative time of the last scoring (non-hazard) event
    last_scoring_ms: u64,
    collected: u32,
    hazard_hits: u32,
    risky_collections: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a collectible pickup. Returns the reward credited, combo bonus
    /// included.
    pub fn on_collect(&mut self, base_value: i64, now_ms: u64, bonus_factor: f64) -> i64 {
        let combo_bonus = if self.combo > 0 {
            (base_value as f64 * self.combo as f64 * bonus_factor).floor() as i64
        } else {
            0
        };
        let reward = base_value + combo_bonus;

        self.score += reward;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.last_scoring_ms = now_ms;
        self.collected += 1;

        reward
    }

    /// Apply a hazard strike: the streak resets to exactly zero.
    pub fn on_hazard(&mut self) {
        self.combo = 0;
        self.hazard_hits += 1;
    }

    /// Expire a streak that has seen no scoring event within the idle window.
    pub fn expire_idle_combo(&mut self, now_ms: u64, idle_window_ms: u64) {
        if self.combo > 0 && now_ms.saturating_sub(self.last_scoring_ms) > idle_window_ms {
            self.combo = 0;
        }
    }

    /// Count a pickup made with hazards nearby.
    pub fn note_risky_collection(&mut self) {
        self.risky_collections += 1;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn hazard_hits(&self) -> u32 {
        self.hazard_hits
    }

    pub fn risky_collections(&self) -> u32 {
        self.risky_collections
    }
}
