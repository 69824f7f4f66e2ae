//! Derived-state calculators
//!
//! Pure functions from player state (or pieces of it) to the values the
//! engine and the presentation layer both need: level lookup, multipliers,
//! upgrade eligibility and cooldown countdowns.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{Millis, Topic};
use crate::data::{CareerLadder, CareerLevel, Upgrade};
use crate::progression::state::PlayerState;

// ============================================================================
// Career levels
// ============================================================================

/// Level containing `followers` (first level if none match)
pub fn current_level(ladder: &CareerLadder, followers: u64) -> &CareerLevel {
    ladder
        .get(ladder.index_for(followers))
        .unwrap_or_else(|| ladder.first())
}

/// Level after the current one, or the current one at the top of the ladder
pub fn next_level(ladder: &CareerLadder, followers: u64) -> &CareerLevel {
    let index = ladder.index_for(followers);
    ladder
        .get(index + 1)
        .unwrap_or_else(|| current_level(ladder, followers))
}

/// Percent progress toward the next level (100 at the top level)
pub fn level_progress(ladder: &CareerLadder, followers: u64) -> f64 {
    let current = current_level(ladder, followers);
    let next = next_level(ladder, followers);
    if current == next || next.min <= current.min {
        return 100.0;
    }
    let span = (next.min - current.min) as f64;
    (followers.saturating_sub(current.min) as f64 / span * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// Multipliers
// ============================================================================

/// Follower-gain multiplier from reach and momentum
///
/// +0.5x per full 1000 followers, times a combo factor of +0.2x per combo
/// step capped at 3x.
pub fn speed_multiplier(followers: u64, combo: u32) -> f64 {
    let level_part = (followers / 1_000) as f64 * 0.5 + 1.0;
    let combo_part = (combo as f64 * 0.2 + 1.0).min(3.0);
    level_part * combo_part
}

/// How a post's topic lines up with what is trending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendFit {
    Trending,
    OffTrend,
    NoTopic,
}

impl TrendFit {
    pub fn multiplier(&self) -> f64 {
        match self {
            TrendFit::Trending => 2.0,
            TrendFit::OffTrend => 0.6,
            TrendFit::NoTopic => 0.5,
        }
    }

    /// Suffix used in follower-gain source labels
    pub fn annotation(&self) -> &'static str {
        match self {
            TrendFit::Trending => " (Trending!)",
            TrendFit::OffTrend | TrendFit::NoTopic => " (Off-trend)",
        }
    }
}

pub fn trend_fit(topic: Option<&Topic>, trending: &[Topic]) -> TrendFit {
    match topic {
        None => TrendFit::NoTopic,
        Some(topic) if trending.iter().any(|t| t.name == topic.name) => TrendFit::Trending,
        Some(_) => TrendFit::OffTrend,
    }
}

/// 2.0 when trending, 0.6 when off-trend, 0.5 without a topic
pub fn trend_multiplier(topic: Option<&Topic>, trending: &[Topic]) -> f64 {
    trend_fit(topic, trending).multiplier()
}

// ============================================================================
// Upgrades
// ============================================================================

/// Why an upgrade cannot be bought right now, if anything
pub fn purchase_check(ladder: &CareerLadder, upgrade: &Upgrade, state: &PlayerState) -> Result<()> {
    let level_index = ladder.index_for(state.followers);
    let required_index = ladder
        .index_of_title(&upgrade.unlock_level)
        .ok_or_else(|| GameError::UnknownUpgrade(upgrade.id.clone()))?;

    if level_index < required_index {
        return Err(GameError::UpgradeLocked {
            id: upgrade.id.clone(),
            required: upgrade.unlock_level.clone(),
        });
    }
    if state.energy < upgrade.cost {
        return Err(GameError::InsufficientEnergy {
            needed: upgrade.cost,
            available: state.energy,
        });
    }
    if !upgrade.repeatable && state.upgrades.owns(&upgrade.id) {
        return Err(GameError::UpgradeOwned(upgrade.id.clone()));
    }
    Ok(())
}

pub fn can_purchase(ladder: &CareerLadder, upgrade: &Upgrade, state: &PlayerState) -> bool {
    purchase_check(ladder, upgrade, state).is_ok()
}

// ============================================================================
// Cooldowns
// ============================================================================

/// Milliseconds until the next post is allowed (0 when never posted)
pub fn cooldown_remaining(last_post: Option<Millis>, cooldown: Millis, now: Millis) -> Millis {
    match last_post {
        Some(last) => cooldown.saturating_sub(now.saturating_sub(last)),
        None => 0,
    }
}

pub fn can_create_post(last_post: Option<Millis>, cooldown: Millis, now: Millis) -> bool {
    match last_post {
        Some(last) => now.saturating_sub(last) >= cooldown,
        None => true,
    }
}

/// Countdown text: tenths below one second ("0.5s"), whole seconds otherwise
///
/// Both round up, so any positive remainder never shows as "0s".
pub fn format_cooldown(last_post: Option<Millis>, cooldown: Millis, now: Millis) -> String {
    format_remaining(cooldown_remaining(last_post, cooldown, now))
}

pub fn format_remaining(remaining_ms: Millis) -> String {
    if remaining_ms < 1_000 {
        let tenths = remaining_ms.div_ceil(100);
        match tenths {
            0 => "0s".to_string(),
            10 => "1s".to_string(),
            t => format!("0.{}s", t),
        }
    } else {
        format!("{}s", remaining_ms.div_ceil(1_000))
    }
}

/// Playthrough duration for the victory summary
pub fn format_completion_time(start: Millis, end: Option<Millis>) -> String {
    let Some(end) = end else {
        return "Unknown".to_string();
    };

    let seconds = end.saturating_sub(start) / 1_000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m", days, hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
