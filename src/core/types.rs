//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds on the engine timeline (simulation time unit)
pub type Millis = u64;

/// Unique identifier for feed posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

/// Unique identifier for transient notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// A trending-topic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    /// Content category the topic naturally belongs to
    #[serde(default)]
    pub category: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            category: category.into(),
        }
    }

    /// Topic identified by name only
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }
}
