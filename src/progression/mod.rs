//! Career progression: player state, derived values, actions and timers

pub mod calculators;
pub mod engine;
pub mod feed;
pub mod notifications;
pub mod schedule;
pub mod state;

pub use calculators::TrendFit;
pub use engine::{CompletionSummary, Engine, PostOption};
pub use feed::{Feed, Post, PostOrigin};
pub use notifications::{AchievementEvent, FollowerGainEvent, GainSource, GameEvent, Notifications};
pub use schedule::{Scheduler, Task, TaskHandle};
pub use state::{Ownership, Perks, PlayerState, UpgradeLedger};
