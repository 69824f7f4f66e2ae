//! Transient notifications and the host-facing event outbox
//!
//! Follower-gain popups and achievement toasts live here until their expiry
//! task removes them. `GameEvent`s are queued for the host to drain.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{EventId, Millis, PostId};
use crate::progression::calculators::TrendFit;

/// Reason a follower award happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GainSource {
    Like,
    Comment,
    Share,
    BatchLike(usize),
    PostEngagement(TrendFit),
    AutoEngagement,
    /// Host- or test-supplied label
    Other(String),
}

impl GainSource {
    /// Only post engagement can go viral
    pub fn can_go_viral(&self) -> bool {
        matches!(self, GainSource::PostEngagement(_))
    }

    pub fn label(&self) -> String {
        match self {
            GainSource::Like => "Like".to_string(),
            GainSource::Comment => "Comment".to_string(),
            GainSource::Share => "Share".to_string(),
            GainSource::BatchLike(n) => format!("Batch Like x{}", n),
            GainSource::PostEngagement(fit) => format!("Post Engagement{}", fit.annotation()),
            GainSource::AutoEngagement => "Auto-Engagement".to_string(),
            GainSource::Other(label) => label.clone(),
        }
    }
}

/// Floating "+N followers" popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerGainEvent {
    pub id: EventId,
    pub amount: u64,
    pub source: GainSource,
    pub speed_multiplier: f64,
    pub combo_bonus: u64,
    pub streak_bonus: u64,
    /// Fractional energy this gain contributed
    pub energy_gain: f64,
    pub viral: bool,
    pub created_at: Millis,
}

impl FollowerGainEvent {
    /// "+12 (1.4x speed, +1 combo)" style text
    pub fn display_text(&self) -> String {
        if self.viral {
            return format!("+{} 🔥 VIRAL!", self.amount);
        }
        if self.speed_multiplier <= 1.0 && self.combo_bonus == 0 && self.streak_bonus == 0 {
            return format!("+{}", self.amount);
        }

        let mut text = format!("+{} ({:.1}x speed", self.amount, self.speed_multiplier);
        if self.combo_bonus > 0 {
            text.push_str(&format!(", +{} combo", self.combo_bonus));
        }
        if self.streak_bonus > 0 {
            text.push_str(&format!(", +{} streak", self.streak_bonus));
        }
        text.push(')');
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementEvent {
    pub id: EventId,
    pub title: String,
    pub icon: String,
    pub unlocked_at: Millis,
}

/// Events for the host, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FollowersGained {
        amount: u64,
        source: String,
        at: Millis,
    },
    WentViral {
        bonus: u64,
        at: Millis,
    },
    AchievementUnlocked {
        title: String,
        icon: String,
        at: Millis,
    },
    Promoted {
        title: String,
        at: Millis,
    },
    PostResolved {
        post_id: PostId,
        likes: u64,
        comments: u64,
        trend: TrendFit,
        at: Millis,
    },
    AutoPostPublished {
        post_id: PostId,
        author: String,
        at: Millis,
    },
    TrendsRotated {
        topics: Vec<String>,
        at: Millis,
    },
    ComboLapsed {
        at: Millis,
    },
    /// Victory signal; follows the completion time being recorded
    Victory {
        elapsed_ms: Millis,
        at: Millis,
    },
}

/// Live popups plus the session's achievement history
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    gains: Vec<FollowerGainEvent>,
    toasts: Vec<AchievementEvent>,
    history: Vec<AchievementEvent>,
    /// Titles unlocked or scheduled to unlock
    claimed: AHashSet<String>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active follower-gain popups, oldest first
    pub fn gains(&self) -> &[FollowerGainEvent] {
        &self.gains
    }

    /// Active achievement toasts, oldest first
    pub fn toasts(&self) -> &[AchievementEvent] {
        &self.toasts
    }

    /// Every achievement unlocked this session
    pub fn history(&self) -> &[AchievementEvent] {
        &self.history
    }

    pub fn has_unlocked(&self, title: &str) -> bool {
        self.history.iter().any(|a| a.title == title)
    }

    /// Reserve a title so it is only scheduled once. False if already taken.
    pub(crate) fn claim(&mut self, title: &str) -> bool {
        !self.has_unlocked(title) && self.claimed.insert(title.to_string())
    }

    pub(crate) fn push_gain(&mut self, gain: FollowerGainEvent) {
        self.gains.push(gain);
    }

    pub(crate) fn push_achievement(&mut self, achievement: AchievementEvent) {
        self.claimed.insert(achievement.title.clone());
        self.history.push(achievement.clone());
        self.toasts.push(achievement);
    }

    pub(crate) fn expire_gain(&mut self, id: EventId) -> bool {
        let before = self.gains.len();
        self.gains.retain(|g| g.id != id);
        self.gains.len() != before
    }

    pub(crate) fn expire_toast(&mut self, id: EventId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}
