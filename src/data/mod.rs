//! Game content supplied to the engine at startup
//!
//! Everything here is read-only once the engine is built. Defaults are
//! compiled in; a host can load a replacement catalog from TOML.

pub mod content;
pub mod levels;
pub mod upgrades;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{GameError, Result};
use crate::core::types::Topic;

pub use content::{ContentCategory, Milestone, Persona, SeedPost, TopicRule};
pub use levels::{CareerLadder, CareerLevel};
pub use upgrades::{Upgrade, UpgradeEffect};

/// Complete content catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub levels: CareerLadder,
    pub upgrades: Vec<Upgrade>,
    pub topics: Vec<Topic>,
    pub categories: Vec<ContentCategory>,
    pub topic_rules: Vec<TopicRule>,
    pub personas: Vec<Persona>,
    pub auto_posts: Vec<String>,
    pub seed_posts: Vec<SeedPost>,
    pub milestones: Vec<Milestone>,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            levels: CareerLadder::with_defaults(),
            upgrades: upgrades::default_upgrades(),
            topics: content::default_topics(),
            categories: content::default_categories(),
            topic_rules: content::default_topic_rules(),
            personas: content::default_personas(),
            auto_posts: content::default_auto_posts(),
            seed_posts: content::default_seed_posts(),
            milestones: content::default_milestones(),
        }
    }
}

impl GameData {
    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from TOML; omitted tables keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: GameData = toml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Cross-table consistency checks (the ladder validates itself)
    pub fn validate(&self) -> Result<()> {
        for (i, upgrade) in self.upgrades.iter().enumerate() {
            if self.levels.index_of_title(&upgrade.unlock_level).is_none() {
                return Err(GameError::InvalidConfig(format!(
                    "upgrade {} unlocks at unknown level {}",
                    upgrade.id, upgrade.unlock_level
                )));
            }
            if self.upgrades[..i].iter().any(|other| other.id == upgrade.id) {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate upgrade id {}",
                    upgrade.id
                )));
            }
        }

        for rule in &self.topic_rules {
            if self.topic(&rule.topic).is_none() {
                return Err(GameError::InvalidConfig(format!(
                    "topic rule points at unknown topic {}",
                    rule.topic
                )));
            }
        }

        Ok(())
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Topic implied by a template's wording, if any rule matches
    pub fn infer_topic(&self, text: &str) -> Option<&Topic> {
        self.topic_rules
            .iter()
            .find(|rule| rule.matches(text))
            .and_then(|rule| self.topic(&rule.topic))
    }
}
