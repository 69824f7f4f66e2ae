//! Progression engine - owns the player state and applies every action
//!
//! Player actions run synchronously against the state. Their deferred
//! consequences (engagement resolution, viral bursts, delayed achievements,
//! notification expiry, victory) are queued on the scheduler and applied by
//! `run_due`, each seeing the state as it is when it fires.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::EngineConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{EventId, Millis, PostId, Topic};
use crate::data::{CareerLevel, GameData, UpgradeEffect};
use crate::progression::calculators::{
    can_create_post, cooldown_remaining, current_level, format_completion_time, format_cooldown,
    level_progress, next_level, purchase_check, speed_multiplier, trend_fit,
};
use crate::progression::feed::{Feed, Post, PostOrigin};
use crate::progression::notifications::{
    AchievementEvent, FollowerGainEvent, GainSource, GameEvent, Notifications,
};
use crate::progression::schedule::{Scheduler, Task, TaskHandle};
use crate::progression::state::PlayerState;

/// Category given to simulated-user posts
pub const AUTO_POST_CATEGORY: &str = "Auto-Generated";

/// A ready-to-publish post suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostOption {
    pub category: String,
    pub content: String,
    pub topic: Option<Topic>,
}

/// Stats shown once the game is won
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub followers: u64,
    pub completion_time: String,
    pub elapsed_ms: Millis,
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

pub struct Engine<C: Clock = SystemClock> {
    clock: C,
    data: GameData,
    config: EngineConfig,
    state: PlayerState,
    feed: Feed,
    notifications: Notifications,
    trending: Vec<Topic>,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    next_post_id: u64,
    combo_timer: Option<TaskHandle>,
    auto_post_timer: Option<TaskHandle>,
    trend_timer: Option<TaskHandle>,
    auto_engagement_timer: Option<TaskHandle>,
    /// Background timers are live between `start` and `shutdown`
    running: bool,
    outbox: Vec<GameEvent>,
}

impl<C: Clock> Engine<C> {
    /// Engine with a fresh player
    pub fn new(data: GameData, config: EngineConfig, clock: C, seed: u64) -> Result<Self> {
        let state = PlayerState::fresh(&config.player, clock.now());
        Self::with_state(data, config, clock, seed, state)
    }

    /// Engine with the built-in catalog and default config
    pub fn with_defaults(clock: C, seed: u64) -> Result<Self> {
        Self::new(GameData::default(), EngineConfig::default(), clock, seed)
    }

    /// Engine around an existing player state
    pub fn with_state(
        data: GameData,
        config: EngineConfig,
        clock: C,
        seed: u64,
        state: PlayerState,
    ) -> Result<Self> {
        data.validate()?;
        config.validate()?;
        if state.energy > state.max_energy {
            return Err(GameError::InvalidConfig(format!(
                "energy {} exceeds max energy {}",
                state.energy, state.max_energy
            )));
        }
        if !(0.0..1.0).contains(&state.fractional_energy) {
            return Err(GameError::InvalidConfig(format!(
                "fractional energy {} outside [0, 1)",
                state.fractional_energy
            )));
        }

        let now = clock.now();
        let mut engine = Self {
            clock,
            data,
            config,
            state,
            feed: Feed::new(),
            notifications: Notifications::new(),
            trending: Vec::new(),
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_post_id: 1,
            combo_timer: None,
            auto_post_timer: None,
            trend_timer: None,
            auto_engagement_timer: None,
            running: false,
            outbox: Vec::new(),
        };

        let seeds = engine.data.seed_posts.clone();
        for seed_post in seeds {
            let id = engine.allocate_post_id();
            engine.feed.push_back(Post {
                id,
                author: seed_post.author,
                role: seed_post.role,
                content: seed_post.content,
                likes: seed_post.likes,
                comments: seed_post.comments,
                shares: seed_post.shares,
                liked: false,
                commented: false,
                category: seed_post.category,
                topic: None,
                origin: PostOrigin::Seeded,
                created_at: now,
                engagement_resolved: true,
            });
        }

        Ok(engine)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn trending(&self) -> &[Topic] {
        &self.trending
    }

    /// Override the trending list until the next rotation
    pub fn set_trending(&mut self, topics: Vec<Topic>) {
        self.trending = topics;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Live scheduled tasks
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Fire time of the next scheduled task
    pub fn next_due(&mut self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn current_level(&self) -> &CareerLevel {
        current_level(&self.data.levels, self.state.followers)
    }

    pub fn next_level(&self) -> &CareerLevel {
        next_level(&self.data.levels, self.state.followers)
    }

    pub fn level_progress(&self) -> f64 {
        level_progress(&self.data.levels, self.state.followers)
    }

    pub fn speed_multiplier(&self) -> f64 {
        speed_multiplier(self.state.followers, self.state.combo)
    }

    pub fn can_post(&self) -> bool {
        can_create_post(self.state.last_post_time, self.state.post_cooldown, self.now())
    }

    pub fn cooldown_text(&self) -> String {
        format_cooldown(self.state.last_post_time, self.state.post_cooldown, self.now())
    }

    pub fn can_purchase(&self, upgrade_id: &str) -> bool {
        self.data
            .upgrade(upgrade_id)
            .map_or(false, |u| purchase_check(&self.data.levels, u, &self.state).is_ok())
    }

    /// Victory stats, once the completion time is recorded
    pub fn completion_summary(&self) -> Option<CompletionSummary> {
        let end = self.state.game_completion_time?;
        Some(CompletionSummary {
            followers: self.state.followers,
            completion_time: format_completion_time(self.state.game_start_time, Some(end)),
            elapsed_ms: end.saturating_sub(self.state.game_start_time),
            total_posts: self.state.total_posts,
            total_likes: self.state.total_likes,
            total_comments: self.state.total_comments,
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Pick the first trends and arm the background timers
    pub fn start(&mut self) {
        let now = self.now();
        self.shutdown();
        self.running = true;
        self.rotate_trends(now);
        self.auto_post_timer = Some(
            self.scheduler
                .schedule(now + self.config.auto_post_interval_ms, Task::AutoPost),
        );
        self.trend_timer = Some(
            self.scheduler
                .schedule(now + self.config.trend_rotation_interval_ms, Task::TrendRotation),
        );
        if self.state.perks.auto_engagement {
            self.arm_auto_engagement(now);
        }
        tracing::debug!("Background timers armed at {}ms", now);
    }

    /// Cancel every recurring timer
    pub fn shutdown(&mut self) {
        self.running = false;
        for handle in [
            self.auto_post_timer.take(),
            self.trend_timer.take(),
            self.auto_engagement_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(handle);
        }
    }

    /// Fire every task due by the clock's current time, in order
    pub fn run_due(&mut self) -> usize {
        let now = self.now();
        let mut fired = 0;
        while let Some((at, task)) = self.scheduler.pop_due(now) {
            tracing::trace!("Firing {:?} scheduled for {}ms", task, at);
            self.dispatch(at, task);
            fired += 1;
        }
        fired
    }

    fn dispatch(&mut self, at: Millis, task: Task) {
        match task {
            Task::ComboReset => {
                self.combo_timer = None;
                self.state.combo = 0;
                self.outbox.push(GameEvent::ComboLapsed { at });
            }
            Task::ResolveEngagement { post_id, topic } => {
                self.resolve_engagement(at, post_id, topic);
            }
            Task::ViralBurst => self.land_viral(at),
            Task::Achievement { title, icon } => self.unlock_achievement(at, title, icon),
            Task::ExpireGain(id) => {
                self.notifications.expire_gain(id);
            }
            Task::ExpireAchievement(id) => {
                self.notifications.expire_toast(id);
            }
            Task::Victory => self.announce_victory(at),
            Task::AutoPost => {
                self.publish_auto_post(at);
                self.auto_post_timer = Some(
                    self.scheduler
                        .schedule(at + self.config.auto_post_interval_ms, Task::AutoPost),
                );
            }
            Task::TrendRotation => {
                self.rotate_trends(at);
                self.trend_timer = Some(
                    self.scheduler
                        .schedule(at + self.config.trend_rotation_interval_ms, Task::TrendRotation),
                );
            }
            Task::AutoEngagement => {
                self.auto_engagement_timer = None;
                if self.state.perks.auto_engagement {
                    let base = self.state.followers / 1_000 + 1;
                    self.award_at(at, base, GainSource::AutoEngagement);
                    self.arm_auto_engagement(at);
                }
            }
        }
    }

    fn arm_auto_engagement(&mut self, now: Millis) {
        if self.running && self.auto_engagement_timer.is_none() {
            self.auto_engagement_timer = Some(self.scheduler.schedule(
                now + self.config.auto_engagement_interval_ms,
                Task::AutoEngagement,
            ));
        }
    }

    // ========================================================================
    // Energy and momentum
    // ========================================================================

    /// Spend energy (halved, rounding up, with the efficiency perk).
    /// Returns false and changes nothing when the player cannot afford it.
    pub fn consume_energy(&mut self, amount: u32) -> bool {
        self.charge(amount).is_ok()
    }

    fn charge(&mut self, amount: u32) -> Result<()> {
        let cost = self.state.effective_cost(amount);
        if self.state.energy < cost {
            tracing::debug!("Refused: need {} energy, have {}", cost, self.state.energy);
            return Err(GameError::InsufficientEnergy {
                needed: cost,
                available: self.state.energy,
            });
        }
        self.state.energy -= cost;
        Ok(())
    }

    /// Count a player action toward combo and streak, and rearm the
    /// combo-reset timer (the previous one is cancelled, never stacked)
    pub(crate) fn register_action(&mut self, now: Millis) {
        let window = self.config.combo_window_ms;
        let within_window = self
            .state
            .last_action_time
            .map_or(false, |last| now.saturating_sub(last) < window);

        if within_window {
            self.state.combo += 1;
            self.state.streak += 1;
        } else {
            self.state.combo = 1;
            self.state.streak = 0;
        }
        self.state.last_action_time = Some(now);

        if let Some(previous) = self.combo_timer.take() {
            self.scheduler.cancel(previous);
        }
        self.combo_timer = Some(self.scheduler.schedule(now + window, Task::ComboReset));
    }

    fn accrue_energy(&mut self, gain: f64) {
        let pooled = self.state.fractional_energy + gain;
        let whole = pooled.floor();
        self.state.fractional_energy = pooled - whole;

        let capped = (self.state.energy as f64 + whole).min(self.state.max_energy as f64);
        self.state.energy = capped as u32;
    }

    // ========================================================================
    // Follower awards
    // ========================================================================

    /// Award followers now; returns the total actually granted
    pub fn award_followers(&mut self, base: u64, source: GainSource) -> u64 {
        let now = self.now();
        self.award_at(now, base, source)
    }

    fn award_at(&mut self, now: Millis, base: u64, source: GainSource) -> u64 {
        let before = self.state.followers;
        let combo = self.state.combo as u64;
        let streak = self.state.streak as u64;

        let speed = speed_multiplier(before, self.state.combo);
        let combo_bonus = if combo > 3 { combo / 3 } else { 0 };
        let streak_bonus = if streak > 10 { streak / 10 } else { 0 };
        let scaled = (base as f64 * speed * self.state.perks.speed_bonus).floor() as u64;
        let total = scaled.saturating_add(combo_bonus + streak_bonus);

        let after = before.saturating_add(total);
        self.state.followers = after;

        // Accrual rate comes from the level held before this award
        let rate = current_level(&self.data.levels, before).energy_rate;
        let energy_gain = total as f64 * rate;
        self.accrue_energy(energy_gain);

        let gain = FollowerGainEvent {
            id: EventId::new(),
            amount: total,
            source: source.clone(),
            speed_multiplier: speed,
            combo_bonus,
            streak_bonus,
            energy_gain,
            viral: false,
            created_at: now,
        };
        let gain_id = gain.id;
        tracing::debug!("{} from {}", gain.display_text(), source.label());
        self.notifications.push_gain(gain);
        self.scheduler
            .schedule(now + self.config.gain_lifetime_ms, Task::ExpireGain(gain_id));
        self.outbox.push(GameEvent::FollowersGained {
            amount: total,
            source: source.label(),
            at: now,
        });

        if source.can_go_viral() && self.rng.gen::<f64>() < self.viral_chance(before) {
            self.scheduler
                .schedule(now + self.config.viral_delay_ms, Task::ViralBurst);
        }

        self.check_promotion(now, before, after);
        self.check_milestones(now, before, after);
        self.check_victory(now);

        total
    }

    fn viral_chance(&self, followers: u64) -> f64 {
        let base = (followers as f64 / 10_000.0).min(0.1);
        if self.state.perks.viral_boost {
            base + 0.1
        } else {
            base
        }
    }

    /// Viral followers skip energy accrual and promotion checks
    fn land_viral(&mut self, at: Millis) {
        let bonus: u64 = self.rng.gen_range(100..600);
        self.state.followers = self.state.followers.saturating_add(bonus);

        let gain = FollowerGainEvent {
            id: EventId::new(),
            amount: bonus,
            source: GainSource::Other("VIRAL".into()),
            speed_multiplier: 1.0,
            combo_bonus: 0,
            streak_bonus: 0,
            energy_gain: 0.0,
            viral: true,
            created_at: at,
        };
        let gain_id = gain.id;
        self.notifications.push_gain(gain);
        self.scheduler
            .schedule(at + self.config.viral_lifetime_ms, Task::ExpireGain(gain_id));

        tracing::info!("Post went viral: +{} followers", bonus);
        self.outbox.push(GameEvent::WentViral { bonus, at });
        self.unlock_achievement(at, "Post Went Viral!".into(), "🔥".into());
        self.check_victory(at);
    }

    fn check_promotion(&mut self, now: Millis, before: u64, after: u64) {
        let ladder = &self.data.levels;
        let (old_index, new_index) = (ladder.index_for(before), ladder.index_for(after));
        if old_index == new_index {
            return;
        }
        let title = current_level(ladder, after).title.clone();
        tracing::info!("Promoted to {} at {} followers", title, after);
        self.outbox.push(GameEvent::Promoted {
            title: title.clone(),
            at: now,
        });
        self.scheduler.schedule(
            now + self.config.promotion_delay_ms,
            Task::Achievement {
                title: format!("Promoted to {}!", title),
                icon: "🎉".into(),
            },
        );
    }

    fn check_milestones(&mut self, now: Millis, before: u64, after: u64) {
        let crossed: Vec<(String, String)> = self
            .data
            .milestones
            .iter()
            .filter(|m| before < m.count && m.count <= after)
            .map(|m| (m.title.clone(), m.icon.clone()))
            .collect();

        for (title, icon) in crossed {
            if self.notifications.claim(&title) {
                self.scheduler.schedule(
                    now + self.config.milestone_delay_ms,
                    Task::Achievement { title, icon },
                );
            }
        }
    }

    /// Records the completion time once; later crossings change nothing
    fn check_victory(&mut self, now: Millis) {
        if self.state.followers < self.config.victory_threshold
            || self.state.game_completion_time.is_some()
        {
            return;
        }
        self.state.game_completion_time = Some(now);
        tracing::info!("Victory threshold reached at {}ms", now);
        self.scheduler
            .schedule(now + self.config.victory_delay_ms, Task::Victory);
    }

    fn announce_victory(&mut self, at: Millis) {
        let elapsed_ms = self
            .state
            .game_completion_time
            .unwrap_or(at)
            .saturating_sub(self.state.game_start_time);
        self.outbox.push(GameEvent::Victory { elapsed_ms, at });
        self.unlock_achievement(
            at,
            "Victory! Global Domination Achieved!".into(),
            "🌍".into(),
        );
    }

    fn unlock_achievement(&mut self, at: Millis, title: String, icon: String) {
        let achievement = AchievementEvent {
            id: EventId::new(),
            title: title.clone(),
            icon: icon.clone(),
            unlocked_at: at,
        };
        let id = achievement.id;
        self.notifications.push_achievement(achievement);
        self.scheduler.schedule(
            at + self.config.achievement_lifetime_ms,
            Task::ExpireAchievement(id),
        );
        tracing::info!("Achievement unlocked: {}", title);
        self.outbox
            .push(GameEvent::AchievementUnlocked { title, icon, at });
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Like a post once; returns the followers gained
    pub fn like_post(&mut self, post_id: PostId) -> Result<u64> {
        let now = self.now();
        let post = self.feed.get(post_id).ok_or(GameError::PostNotFound(post_id))?;
        if post.liked {
            return Err(GameError::AlreadyLiked(post_id));
        }
        self.charge(self.config.like_cost)?;
        self.register_action(now);

        if let Some(post) = self.feed.get_mut(post_id) {
            post.liked = true;
            post.likes += 1;
        }
        self.state.total_likes += 1;

        let base = self.rng.gen_range(1..=3);
        Ok(self.award_at(now, base, GainSource::Like))
    }

    /// Comment on a post once; returns the followers gained
    pub fn comment_post(&mut self, post_id: PostId) -> Result<u64> {
        let now = self.now();
        let post = self.feed.get(post_id).ok_or(GameError::PostNotFound(post_id))?;
        if post.commented {
            return Err(GameError::AlreadyCommented(post_id));
        }
        self.charge(self.config.comment_cost)?;
        self.register_action(now);

        if let Some(post) = self.feed.get_mut(post_id) {
            post.commented = true;
            post.comments += 1;
        }
        self.state.total_comments += 1;

        let base = self.rng.gen_range(3..=8);
        Ok(self.award_at(now, base, GainSource::Comment))
    }

    /// Share a post (no per-post limit); returns the followers gained
    pub fn share_post(&mut self, post_id: PostId) -> Result<u64> {
        let now = self.now();
        if self.feed.get(post_id).is_none() {
            return Err(GameError::PostNotFound(post_id));
        }
        self.charge(self.config.share_cost)?;
        self.register_action(now);

        if let Some(post) = self.feed.get_mut(post_id) {
            post.shares += 1;
        }

        let base = self.rng.gen_range(2..=5);
        Ok(self.award_at(now, base, GainSource::Share))
    }

    /// Like up to `batch_like_limit` unliked posts in feed order for one
    /// aggregate award; returns how many posts were liked
    pub fn batch_like(&mut self) -> Result<usize> {
        if !self.state.perks.batch_actions {
            return Err(GameError::PerkMissing("batch_actions".into()));
        }
        let unliked = self.feed.unliked_count();
        if unliked == 0 {
            return Err(GameError::NothingToLike);
        }
        let count = unliked
            .min(self.state.energy as usize)
            .min(self.config.batch_like_limit);
        if count == 0 {
            return Err(GameError::InsufficientEnergy {
                needed: self.state.effective_cost(1),
                available: self.state.energy,
            });
        }

        let now = self.now();
        self.charge(count as u32)?;
        self.register_action(now);

        let liked = self.feed.like_first_unliked(count);
        self.state.total_likes += liked.len() as u64;

        let per_post: u64 = self.rng.gen_range(1..=3);
        self.award_at(now, count as u64 * per_post, GainSource::BatchLike(count));
        Ok(count)
    }

    /// Publish a player post; engagement is filled in later
    pub fn create_post(
        &mut self,
        category: impl Into<String>,
        content: impl Into<String>,
        topic: Option<Topic>,
    ) -> Result<PostId> {
        let now = self.now();
        if !can_create_post(self.state.last_post_time, self.state.post_cooldown, now) {
            return Err(GameError::CooldownActive {
                remaining_ms: cooldown_remaining(
                    self.state.last_post_time,
                    self.state.post_cooldown,
                    now,
                ),
            });
        }
        self.charge(self.config.post_cost)?;
        self.register_action(now);

        let id = self.allocate_post_id();
        let role = self.current_level().title.clone();
        self.feed.push_front(Post {
            id,
            author: self.state.name.clone(),
            role,
            content: content.into(),
            likes: 0,
            comments: 0,
            shares: 0,
            liked: false,
            commented: false,
            category: category.into(),
            topic: topic.clone(),
            origin: PostOrigin::Player,
            created_at: now,
            engagement_resolved: false,
        });
        self.state.total_posts += 1;
        self.state.last_post_time = Some(now);

        let delay = self.engagement_delay();
        self.scheduler
            .schedule(now + delay, Task::ResolveEngagement { post_id: id, topic });
        tracing::debug!("Post {:?} published, engagement in {}ms", id, delay);
        Ok(id)
    }

    /// Engagement arrives faster as the audience grows
    pub fn engagement_delay(&self) -> Millis {
        self.config
            .engagement_base_delay_ms
            .saturating_sub(self.state.followers / 10)
            .max(self.config.engagement_min_delay_ms)
    }

    fn resolve_engagement(&mut self, at: Millis, post_id: PostId, topic: Option<Topic>) {
        // Multipliers are read now; trends may have rotated since posting
        let speed = speed_multiplier(self.state.followers, self.state.combo);
        let fit = trend_fit(topic.as_ref(), &self.trending);
        let scale = speed * fit.multiplier();

        let likes = ((self.rng.gen::<f64>() * 50.0 + 10.0) * scale).floor() as u64;
        let comments = ((self.rng.gen::<f64>() * 20.0 + 5.0) * scale).floor() as u64;
        let gain = ((self.rng.gen::<f64>() * 46.0 + 5.0) * scale).floor() as u64;

        if let Some(post) = self.feed.get_mut(post_id) {
            post.likes = likes;
            post.comments = comments;
            post.engagement_resolved = true;
        }
        self.outbox.push(GameEvent::PostResolved {
            post_id,
            likes,
            comments,
            trend: fit,
            at,
        });
        self.award_at(at, gain, GainSource::PostEngagement(fit));
    }

    /// Buy an upgrade and apply its effect
    pub fn purchase_upgrade(&mut self, upgrade_id: &str) -> Result<()> {
        let now = self.now();
        let upgrade = self
            .data
            .upgrade(upgrade_id)
            .cloned()
            .ok_or_else(|| GameError::UnknownUpgrade(upgrade_id.to_string()))?;

        purchase_check(&self.data.levels, &upgrade, &self.state)?;
        self.charge(upgrade.cost)?;

        self.state.upgrades.record(&upgrade.id, upgrade.repeatable);
        self.state.apply_effect(upgrade.effect);
        if upgrade.effect == UpgradeEffect::AutoEngagement {
            self.arm_auto_engagement(now);
        }

        tracing::info!("Purchased {} for {} energy", upgrade.name, upgrade.cost);
        self.unlock_achievement(now, format!("Purchased {}!", upgrade.name), upgrade.icon);
        Ok(())
    }

    /// `count` distinct post suggestions drawn from the template table
    pub fn post_options(&mut self, count: usize) -> Vec<PostOption> {
        let mut options = Vec::new();
        for category in &self.data.categories {
            for template in &category.templates {
                let topic = match self.data.infer_topic(template) {
                    Some(topic) => Some(topic.clone()),
                    None => self.data.topics.choose(&mut self.rng).cloned(),
                };
                options.push(PostOption {
                    category: category.name.clone(),
                    content: template.clone(),
                    topic,
                });
            }
        }
        options.shuffle(&mut self.rng);
        options.truncate(count);
        options
    }

    // ========================================================================
    // Background generators
    // ========================================================================

    fn publish_auto_post(&mut self, at: Millis) {
        let persona = self.data.personas.choose(&mut self.rng).cloned();
        let content = self.data.auto_posts.choose(&mut self.rng).cloned();
        let (Some(persona), Some(content)) = (persona, content) else {
            return;
        };

        let id = self.allocate_post_id();
        let post = Post {
            id,
            author: persona.name.clone(),
            role: persona.role,
            content,
            likes: self.rng.gen_range(20..220),
            comments: self.rng.gen_range(5..55),
            shares: self.rng.gen_range(2..32),
            liked: false,
            commented: false,
            category: AUTO_POST_CATEGORY.into(),
            topic: None,
            origin: PostOrigin::Simulated,
            created_at: at,
            engagement_resolved: true,
        };
        let dropped = self.feed.push_front_bounded(post, self.config.feed_capacity);
        if !dropped.is_empty() {
            tracing::trace!("Feed trimmed {} old posts", dropped.len());
        }
        self.outbox.push(GameEvent::AutoPostPublished {
            post_id: id,
            author: persona.name,
            at,
        });
    }

    fn rotate_trends(&mut self, at: Millis) {
        self.trending = self
            .data
            .topics
            .choose_multiple(&mut self.rng, self.config.trending_count)
            .cloned()
            .collect();
        let topics: Vec<String> = self.trending.iter().map(|t| t.name.clone()).collect();
        tracing::debug!("Trending now: {}", topics.join(", "));
        self.outbox.push(GameEvent::TrendsRotated { topics, at });
    }

    fn allocate_post_id(&mut self) -> PostId {
        let id = PostId(self.next_post_id);
        self.next_post_id += 1;
        id
    }
}
