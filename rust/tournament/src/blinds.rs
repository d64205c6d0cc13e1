//! Escalating blind schedule.
//!
//! The schedule is a pure function of the hand number, so drivers can query
//! it statelessly and replays always see the same stakes. Blinds grow
//! geometrically every `hands_per_level` hands; from level 3 on an ante of
//! 10% of the current big blind applies, which therefore scales with the
//! same multiplier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlindLevel {
    /// 1-based level number
    pub level: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub ante: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct BlindSchedule {
    pub initial_small_blind: u32,
    pub initial_big_blind: u32,
    pub hands_per_level: u32,
    pub multiplier: f64,
}

impl BlindSchedule {
    pub fn new(initial_small_blind: u32, initial_big_blind: u32) -> Self {
        Self {
            initial_small_blind,
            initial_big_blind,
            hands_per_level: 20,
            multiplier: 1.5,
        }
    }

    pub fn with_pacing(mut self, hands_per_level: u32, multiplier: f64) -> Self {
        self.hands_per_level = hands_per_level.max(1);
        self.multiplier = multiplier;
        self
    }

    /// A schedule that never escalates.
    pub fn flat(small_blind: u32, big_blind: u32) -> Self {
        Self {
            initial_small_blind: small_blind,
            initial_big_blind: big_blind,
            hands_per_level: u32::MAX,
            multiplier: 1.0,
        }
    }

    /// Stakes in force for a 1-based hand number.
    pub fn level_for(&self, hand_number: u64) -> BlindLevel {
        let index = ((hand_number.max(1) - 1) / self.hands_per_level as u64) as i32;
        let factor = self.multiplier.powi(index);
        let small_blind = (self.initial_small_blind as f64 * factor) as u32;
        let big_blind = (self.initial_big_blind as f64 * factor) as u32;
        let level = index as u32 + 1;
        let ante = if level >= 3 {
            (big_blind as f64 * 0.1) as u32
        } else {
            0
        };
        BlindLevel {
            level,
            small_blind,
            big_blind,
            ante,
        }
    }
}
