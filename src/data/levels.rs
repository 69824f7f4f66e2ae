//! Career ladder - named tiers over follower-count ranges
//!
//! Each level covers the closed range `[min, max]`. Levels are stored in
//! ascending order, start at zero, touch end-to-start, and the last one is
//! open-ended. A count sitting on a shared boundary belongs to the lower
//! level, so 100 followers is still an Intern.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// A single career tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerLevel {
    pub title: String,
    /// Inclusive lower bound
    pub min: u64,
    /// Inclusive upper bound; `None` for the top tier
    #[serde(default)]
    pub max: Option<u64>,
    /// Energy accrued per follower gained while at this level
    pub energy_rate: f64,
    #[serde(default)]
    pub description: String,
    /// Human-readable perk text
    #[serde(default)]
    pub perk: String,
    #[serde(default)]
    pub icon: String,
}

impl CareerLevel {
    pub fn contains(&self, followers: u64) -> bool {
        followers >= self.min && self.max.map_or(true, |max| followers <= max)
    }
}

/// Ordered, validated list of career levels
///
/// Construction checks the coverage invariant, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CareerLevel>", into = "Vec<CareerLevel>")]
pub struct CareerLadder {
    levels: Vec<CareerLevel>,
}

impl CareerLadder {
    pub fn new(levels: Vec<CareerLevel>) -> Result<Self> {
        let first = levels
            .first()
            .ok_or_else(|| GameError::InvalidConfig("career ladder has no levels".into()))?;
        if first.min != 0 {
            return Err(GameError::InvalidConfig(format!(
                "first level {} must start at 0, starts at {}",
                first.title, first.min
            )));
        }

        for pair in levels.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max {
                Some(max) if max == upper.min && max > lower.min => {}
                Some(max) => {
                    return Err(GameError::InvalidConfig(format!(
                        "level {} ends at {} but {} starts at {}",
                        lower.title, max, upper.title, upper.min
                    )))
                }
                None => {
                    return Err(GameError::InvalidConfig(format!(
                        "level {} is open-ended but is followed by {}",
                        lower.title, upper.title
                    )))
                }
            }
        }

        // Checked non-empty above
        let last = &levels[levels.len() - 1];
        if last.max.is_some() {
            return Err(GameError::InvalidConfig(format!(
                "top level {} must be open-ended",
                last.title
            )));
        }

        for level in &levels {
            if !(0.0..=1.0).contains(&level.energy_rate) {
                return Err(GameError::InvalidConfig(format!(
                    "level {} has energy rate {} outside [0, 1]",
                    level.title, level.energy_rate
                )));
            }
        }

        Ok(Self { levels })
    }

    /// The default GamedIn ladder
    pub fn with_defaults() -> Self {
        let tier = |title: &str, min: u64, max: Option<u64>, rate: f64, description: &str, perk: &str, icon: &str| {
            CareerLevel {
                title: title.into(),
                min,
                max,
                energy_rate: rate,
                description: description.into(),
                perk: perk.into(),
                icon: icon.into(),
            }
        };

        Self {
            levels: vec![
                tier("Intern", 0, Some(100), 0.1, "Starting your professional journey", "+1 energy per 10 followers gained", "📝"),
                tier("Professional", 100, Some(500), 0.15, "Building your professional brand", "+1.5 energy per 10 followers gained", "💼"),
                tier("Manager", 500, Some(1_500), 0.2, "Leading teams and projects", "+2 energy per 10 followers gained", "👔"),
                tier("Director", 1_500, Some(5_000), 0.25, "Strategic leadership role", "+2.5 energy per 10 followers gained", "🎯"),
                tier("VP", 5_000, Some(15_000), 0.3, "Executive leadership position", "+3 energy per 10 followers gained", "👑"),
                tier("C-Suite", 15_000, None, 0.5, "Ultimate professional achievement - Global influence", "+5 energy per 10 followers gained", "💎"),
            ],
        }
    }

    pub fn levels(&self) -> &[CareerLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the first level containing `followers`, falling back to the first level
    pub fn index_for(&self, followers: u64) -> usize {
        self.levels
            .iter()
            .position(|level| level.contains(followers))
            .unwrap_or(0)
    }

    /// Index of the level with the given title
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.title == title)
    }

    pub fn get(&self, index: usize) -> Option<&CareerLevel> {
        self.levels.get(index)
    }

    pub fn first(&self) -> &CareerLevel {
        &self.levels[0]
    }
}

impl TryFrom<Vec<CareerLevel>> for CareerLadder {
    type Error = GameError;

    fn try_from(levels: Vec<CareerLevel>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<CareerLadder> for Vec<CareerLevel> {
    fn from(ladder: CareerLadder) -> Self {
        ladder.levels
    }
}

impl Default for CareerLadder {
    fn default() -> Self {
        Self::with_defaults()
    }
}
