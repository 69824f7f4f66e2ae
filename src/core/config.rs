//! Engine configuration with documented constants
//!
//! All timing and economy numbers are collected here with explanations of
//! their purpose and how they interact with each other.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{GameError, Result};
use crate::core::types::Millis;

/// Configuration for the progression engine
///
/// These values define the pacing of the game. Changing them will affect
/// how quickly a player climbs the career ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === MOMENTUM ===
    /// Window in which a follow-up action extends the combo (ms)
    ///
    /// Also the delay of the combo-reset timer armed by every action.
    pub combo_window_ms: Millis,

    // === NOTIFICATIONS ===
    /// Lifetime of a regular follower-gain notification (ms)
    pub gain_lifetime_ms: Millis,

    /// Lifetime of a viral follower-gain notification (ms)
    pub viral_lifetime_ms: Millis,

    /// Lifetime of an achievement toast (ms)
    pub achievement_lifetime_ms: Millis,

    // === DEFERRED EFFECTS ===
    /// Delay between a successful viral roll and the bonus landing (ms)
    pub viral_delay_ms: Millis,

    /// Delay before a promotion achievement is shown (ms)
    pub promotion_delay_ms: Millis,

    /// Delay before a milestone achievement is shown (ms)
    pub milestone_delay_ms: Millis,

    /// Delay between crossing the victory threshold and the victory signal (ms)
    pub victory_delay_ms: Millis,

    /// Slowest post-engagement resolution (ms)
    ///
    /// Every 10 followers shave 1ms off, down to `engagement_min_delay_ms`.
    pub engagement_base_delay_ms: Millis,

    /// Fastest post-engagement resolution (ms)
    pub engagement_min_delay_ms: Millis,

    // === BACKGROUND TIMERS ===
    /// Period of the simulated-user auto-post generator (ms)
    pub auto_post_interval_ms: Millis,

    /// Period of trending-topic rotation (ms)
    pub trend_rotation_interval_ms: Millis,

    /// Period of the auto-engagement payout while the upgrade is owned (ms)
    pub auto_engagement_interval_ms: Millis,

    /// Number of topics trending at once
    pub trending_count: usize,

    /// Maximum feed length after an auto-post is prepended
    pub feed_capacity: usize,

    // === ECONOMY ===
    /// Energy cost of liking a post
    pub like_cost: u32,

    /// Energy cost of commenting on a post
    pub comment_cost: u32,

    /// Energy cost of sharing a post
    pub share_cost: u32,

    /// Energy cost of publishing a post
    pub post_cost: u32,

    /// Maximum number of posts liked by one batch action
    pub batch_like_limit: usize,

    /// Follower count that ends the game (Earth's population)
    pub victory_threshold: u64,

    // === STARTING PLAYER ===
    pub player: PlayerDefaults,
}

/// Values a fresh player starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDefaults {
    pub name: String,
    pub followers: u64,
    pub energy: u32,
    pub max_energy: u32,
    /// Cooldown between player posts (ms)
    pub post_cooldown_ms: Millis,
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            name: "Alex Professional".into(),
            followers: 47,
            energy: 20,
            max_energy: 20,
            post_cooldown_ms: 20_000,
            total_posts: 3,
            total_likes: 15,
            total_comments: 8,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combo_window_ms: 3_000,

            gain_lifetime_ms: 2_000,
            viral_lifetime_ms: 3_000,
            achievement_lifetime_ms: 3_000,

            viral_delay_ms: 1_000,
            promotion_delay_ms: 500,
            milestone_delay_ms: 1_000,
            victory_delay_ms: 2_000,
            engagement_base_delay_ms: 2_000,
            engagement_min_delay_ms: 500,

            auto_post_interval_ms: 8_000,
            trend_rotation_interval_ms: 120_000,
            auto_engagement_interval_ms: 10_000,
            trending_count: 3,
            feed_capacity: 20,

            like_cost: 1,
            comment_cost: 2,
            share_cost: 1,
            post_cost: 3,
            batch_like_limit: 5,
            victory_threshold: 8_000_000_000,

            player: PlayerDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.combo_window_ms == 0 {
            return Err(GameError::InvalidConfig("combo_window_ms must be positive".into()));
        }

        // Recurring timers with a zero period would refire forever in one pump
        if self.auto_post_interval_ms == 0
            || self.trend_rotation_interval_ms == 0
            || self.auto_engagement_interval_ms == 0
        {
            return Err(GameError::InvalidConfig(
                "background timer intervals must be positive".into(),
            ));
        }

        if self.engagement_min_delay_ms > self.engagement_base_delay_ms {
            return Err(GameError::InvalidConfig(format!(
                "engagement_min_delay_ms ({}) should be <= engagement_base_delay_ms ({})",
                self.engagement_min_delay_ms, self.engagement_base_delay_ms
            )));
        }

        if self.feed_capacity == 0 {
            return Err(GameError::InvalidConfig("feed_capacity must be positive".into()));
        }

        if self.player.energy > self.player.max_energy {
            return Err(GameError::InvalidConfig(format!(
                "starting energy ({}) exceeds max energy ({})",
                self.player.energy, self.player.max_energy
            )));
        }

        Ok(())
    }
}
