//! Player state owned by the engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::config::PlayerDefaults;
use crate::core::types::Millis;
use crate::data::UpgradeEffect;

/// How much of an upgrade the player owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ownership {
    /// One-shot upgrade
    Owned(bool),
    /// Purchases of a repeatable upgrade
    Count(u32),
}

/// Upgrade id -> ownership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeLedger {
    owned: BTreeMap<String, Ownership>,
}

impl UpgradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the upgrade has been bought at least once
    pub fn owns(&self, id: &str) -> bool {
        match self.owned.get(id) {
            Some(Ownership::Owned(owned)) => *owned,
            Some(Ownership::Count(n)) => *n > 0,
            None => false,
        }
    }

    /// Number of purchases (one-shot upgrades count as 1)
    pub fn count(&self, id: &str) -> u32 {
        match self.owned.get(id) {
            Some(Ownership::Owned(true)) => 1,
            Some(Ownership::Count(n)) => *n,
            _ => 0,
        }
    }

    pub fn get(&self, id: &str) -> Option<Ownership> {
        self.owned.get(id).copied()
    }

    pub(crate) fn record(&mut self, id: &str, repeatable: bool) {
        if repeatable {
            let n = self.count(id);
            self.owned.insert(id.to_string(), Ownership::Count(n + 1));
        } else {
            self.owned.insert(id.to_string(), Ownership::Owned(true));
        }
    }
}

/// Accumulated upgrade effects consulted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perks {
    /// Multiplies every follower award; starts at 1.0
    pub speed_bonus: f64,
    pub batch_actions: bool,
    pub auto_engagement: bool,
    pub viral_boost: bool,
    pub energy_efficiency: bool,
}

impl Default for Perks {
    fn default() -> Self {
        Self {
            speed_bonus: 1.0,
            batch_actions: false,
            auto_engagement: false,
            viral_boost: false,
            energy_efficiency: false,
        }
    }
}

/// The single mutable player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub followers: u64,
    pub energy: u32,
    pub max_energy: u32,
    /// Sub-unit energy carried between awards, always in [0, 1)
    pub fractional_energy: f64,
    pub combo: u32,
    pub streak: u32,
    pub last_action_time: Option<Millis>,
    pub last_post_time: Option<Millis>,
    pub post_cooldown: Millis,
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub upgrades: UpgradeLedger,
    pub perks: Perks,
    pub game_start_time: Millis,
    pub game_completion_time: Option<Millis>,
}

impl PlayerState {
    pub fn fresh(defaults: &PlayerDefaults, now: Millis) -> Self {
        Self {
            name: defaults.name.clone(),
            followers: defaults.followers,
            energy: defaults.energy,
            max_energy: defaults.max_energy,
            fractional_energy: 0.0,
            combo: 0,
            streak: 0,
            last_action_time: None,
            last_post_time: None,
            post_cooldown: defaults.post_cooldown_ms,
            total_posts: defaults.total_posts,
            total_likes: defaults.total_likes,
            total_comments: defaults.total_comments,
            upgrades: UpgradeLedger::new(),
            perks: Perks::default(),
            game_start_time: now,
            game_completion_time: None,
        }
    }

    /// Energy actually charged for a nominal cost
    pub fn effective_cost(&self, amount: u32) -> u32 {
        if self.perks.energy_efficiency {
            amount.div_ceil(2)
        } else {
            amount
        }
    }

    /// Apply an upgrade's effect to the state
    pub(crate) fn apply_effect(&mut self, effect: UpgradeEffect) {
        match effect {
            UpgradeEffect::MaxEnergy { amount } => {
                self.max_energy += amount;
            }
            UpgradeEffect::CooldownReduction { amount_ms, floor_ms } => {
                let reduced = self.post_cooldown.saturating_sub(amount_ms).max(floor_ms);
                // The floor never raises an already-shorter cooldown
                self.post_cooldown = reduced.min(self.post_cooldown);
            }
            UpgradeEffect::CooldownHalving { floor_ms } => {
                let halved = (self.post_cooldown / 2).max(floor_ms);
                self.post_cooldown = halved.min(self.post_cooldown);
            }
            UpgradeEffect::SpeedBonus { amount } => {
                self.perks.speed_bonus += amount;
            }
            UpgradeEffect::BatchActions => self.perks.batch_actions = true,
            UpgradeEffect::AutoEngagement => self.perks.auto_engagement = true,
            UpgradeEffect::ViralBoost => self.perks.viral_boost = true,
            UpgradeEffect::EnergyEfficiency => self.perks.energy_efficiency = true,
        }
    }
}
