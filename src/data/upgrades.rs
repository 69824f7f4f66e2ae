//! Upgrade shop catalog
//!
//! Each upgrade carries a tagged effect. Adding an upgrade means adding a
//! catalog entry and, for a new kind of effect, one `UpgradeEffect` variant.

use serde::{Deserialize, Serialize};

use crate::core::types::Millis;

/// What an upgrade does once bought
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Permanently raise the energy cap
    MaxEnergy { amount: u32 },
    /// Subtract from the post cooldown, never going below `floor_ms`
    CooldownReduction { amount_ms: Millis, floor_ms: Millis },
    /// Halve the post cooldown, never going below `floor_ms`
    CooldownHalving { floor_ms: Millis },
    /// Add to the follower-gain speed bonus
    SpeedBonus { amount: f64 },
    /// Unlock batch liking
    BatchActions,
    /// Unlock the periodic auto-engagement payout
    AutoEngagement,
    /// Flat bonus to the viral chance of post engagement
    ViralBoost,
    /// Halve (rounding up) every energy cost
    EnergyEfficiency,
}

/// A purchasable upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Energy cost
    pub cost: u32,
    /// Title of the first career level that may buy it
    pub unlock_level: String,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub icon: String,
    pub effect: UpgradeEffect,
}

/// Default upgrade shop
pub fn default_upgrades() -> Vec<Upgrade> {
    let upgrade = |id: &str, name: &str, description: &str, cost: u32, unlock: &str, repeatable: bool, icon: &str, effect: UpgradeEffect| {
        Upgrade {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            cost,
            unlock_level: unlock.into(),
            repeatable,
            icon: icon.into(),
            effect,
        }
    };

    vec![
        upgrade(
            "max_energy",
            "Energy Storage Upgrade",
            "Increase maximum energy capacity by 10",
            15,
            "Intern",
            true,
            "🔋",
            UpgradeEffect::MaxEnergy { amount: 10 },
        ),
        upgrade(
            "fast_posting",
            "Fast Posting",
            "Reduce post cooldown by 5 seconds",
            25,
            "Intern",
            true,
            "⏱️",
            UpgradeEffect::CooldownReduction { amount_ms: 5_000, floor_ms: 5_000 },
        ),
        upgrade(
            "ultra_fast_posting",
            "Ultra Fast Posting",
            "Cut remaining cooldown time in half",
            50,
            "Intern",
            true,
            "⚡",
            UpgradeEffect::CooldownHalving { floor_ms: 2_500 },
        ),
        upgrade(
            "batch_actions",
            "Batch Actions",
            "Like multiple posts at once with a single click",
            50,
            "Professional",
            false,
            "⚡",
            UpgradeEffect::BatchActions,
        ),
        upgrade(
            "auto_engagement",
            "Auto-Engagement",
            "Automatically gain followers every 10 seconds",
            100,
            "Manager",
            false,
            "🤖",
            UpgradeEffect::AutoEngagement,
        ),
        upgrade(
            "viral_boost",
            "Viral Boost",
            "Increase chance of posts going viral by 10%",
            150,
            "Director",
            false,
            "🔥",
            UpgradeEffect::ViralBoost,
        ),
        upgrade(
            "energy_efficiency",
            "Energy Efficiency",
            "All actions cost 50% less energy",
            200,
            "VP",
            false,
            "💚",
            UpgradeEffect::EnergyEfficiency,
        ),
        upgrade(
            "speed_multiplier",
            "Speed Multiplier Upgrade",
            "Permanently increase follower gains by 50%",
            300,
            "C-Suite",
            true,
            "🚀",
            UpgradeEffect::SpeedBonus { amount: 0.5 },
        ),
    ]
}
