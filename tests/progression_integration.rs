//! Integration tests for the progression engine
//!
//! These drive the engine through its public API on a manual clock:
//! - Follower awards and fractional energy accrual
//! - Player actions and their refusals
//! - Deferred effects (engagement, promotions, milestones, victory)
//! - Background timers (auto-posts, trend rotation, auto-engagement)

use gamedin::core::clock::{Clock, ManualClock};
use gamedin::core::config::EngineConfig;
use gamedin::core::error::GameError;
use gamedin::core::types::{PostId, Topic};
use gamedin::data::GameData;
use gamedin::progression::{Engine, GainSource, GameEvent, PlayerState, PostOrigin, TrendFit};

const START: u64 = 1_000_000;

fn engine_with(setup: impl FnOnce(&mut PlayerState)) -> (Engine<ManualClock>, ManualClock) {
    let clock = ManualClock::starting_at(START);
    let mut state = PlayerState::fresh(&EngineConfig::default().player, START);
    setup(&mut state);
    let engine = Engine::with_state(
        GameData::default(),
        EngineConfig::default(),
        clock.clone(),
        42,
        state,
    )
    .unwrap();
    (engine, clock)
}

fn fresh_engine() -> (Engine<ManualClock>, ManualClock) {
    engine_with(|_| {})
}

fn advance(engine: &mut Engine<ManualClock>, clock: &ManualClock, by: u64) -> Vec<GameEvent> {
    clock.advance(by);
    engine.run_due();
    engine.drain_events()
}

// ============================================================================
// Awards and Energy Accrual
// ============================================================================

/// Three small awards at Intern level pool their fractional energy until a
/// whole point rolls over
#[test]
fn test_fractional_energy_accumulates_across_awards() {
    let (mut engine, _) = engine_with(|s| s.energy = 15);

    engine.award_followers(3, GainSource::Like);
    engine.award_followers(3, GainSource::Like);
    assert_eq!(engine.state().followers, 53);
    assert_eq!(engine.state().energy, 15);
    assert!((engine.state().fractional_energy - 0.6).abs() < 1e-9);

    engine.award_followers(5, GainSource::Comment);
    assert_eq!(engine.state().followers, 58);
    assert_eq!(engine.state().energy, 16);
    assert!((engine.state().fractional_energy - 0.1).abs() < 1e-9);
}

#[test]
fn test_consume_energy_refusal_leaves_energy_untouched() {
    let (mut engine, _) = fresh_engine();
    assert_eq!(engine.state().max_energy, 20);

    assert!(!engine.consume_energy(25));
    assert_eq!(engine.state().energy, 20);

    assert!(engine.consume_energy(5));
    assert_eq!(engine.state().energy, 15);
}

#[test]
fn test_large_award_caps_energy_at_max() {
    let (mut engine, _) = engine_with(|s| s.energy = 10);

    let awarded = engine.award_followers(500, GainSource::Other("Viral Post".into()));
    assert_eq!(awarded, 500);
    assert_eq!(engine.state().followers, 547);
    assert_eq!(engine.state().energy, engine.state().max_energy);
    assert!(engine.state().fractional_energy < 1.0);
}

#[test]
fn test_combo_and_streak_bonuses_are_added() {
    let (mut engine, _) = engine_with(|s| {
        s.combo = 6;
        s.streak = 12;
    });

    // floor(10 * 2.2) + 6/3 + 12/10
    let awarded = engine.award_followers(10, GainSource::Other("Test".into()));
    assert_eq!(awarded, 25);

    let popup = engine.notifications().gains().last().unwrap();
    assert_eq!(popup.combo_bonus, 2);
    assert_eq!(popup.streak_bonus, 1);
    assert!(!popup.viral);
}

#[test]
fn test_gain_popup_expires() {
    let (mut engine, clock) = fresh_engine();
    engine.award_followers(2, GainSource::Like);
    assert_eq!(engine.notifications().gains().len(), 1);

    advance(&mut engine, &clock, 1_999);
    assert_eq!(engine.notifications().gains().len(), 1);

    advance(&mut engine, &clock, 1);
    assert!(engine.notifications().gains().is_empty());
}

// ============================================================================
// Feed Actions
// ============================================================================

#[test]
fn test_like_post_once() {
    let (mut engine, _) = fresh_engine();
    let post = PostId(1);
    let likes_before = engine.feed().get(post).unwrap().likes;

    let gained = engine.like_post(post).unwrap();
    assert!((1..=3).contains(&gained));
    assert_eq!(engine.state().followers, 47 + gained);
    assert_eq!(engine.state().energy, 19);
    assert_eq!(engine.state().total_likes, 16);
    assert_eq!(engine.state().combo, 1);

    let liked = engine.feed().get(post).unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes, likes_before + 1);

    // Second like is refused before any energy is charged
    assert!(matches!(engine.like_post(post), Err(GameError::AlreadyLiked(_))));
    assert_eq!(engine.state().energy, 19);
    assert_eq!(engine.state().combo, 1);

    assert!(matches!(
        engine.like_post(PostId(999)),
        Err(GameError::PostNotFound(_))
    ));
}

#[test]
fn test_comment_and_share() {
    let (mut engine, _) = fresh_engine();

    let gained = engine.comment_post(PostId(2)).unwrap();
    assert!(gained >= 3);
    assert_eq!(engine.state().energy, 18);
    assert_eq!(engine.state().total_comments, 9);
    assert!(engine.feed().get(PostId(2)).unwrap().commented);
    assert!(matches!(
        engine.comment_post(PostId(2)),
        Err(GameError::AlreadyCommented(_))
    ));

    let shares_before = engine.feed().get(PostId(3)).unwrap().shares;
    engine.share_post(PostId(3)).unwrap();
    engine.share_post(PostId(3)).unwrap();
    assert_eq!(engine.feed().get(PostId(3)).unwrap().shares, shares_before + 2);
    // 4 spent; accrued fractions may have rolled over
    assert!((16..=18).contains(&engine.state().energy));
}

#[test]
fn test_action_refused_without_energy() {
    let (mut engine, _) = engine_with(|s| s.energy = 1);

    let result = engine.comment_post(PostId(1));
    assert!(matches!(
        result,
        Err(GameError::InsufficientEnergy { needed: 2, available: 1 })
    ));
    assert!(!engine.feed().get(PostId(1)).unwrap().commented);
    assert_eq!(engine.state().combo, 0);
    assert!(engine.state().last_action_time.is_none());
}

#[test]
fn test_momentum_builds_then_lapses() {
    let (mut engine, clock) = fresh_engine();

    engine.like_post(PostId(1)).unwrap();
    advance(&mut engine, &clock, 1_000);
    engine.like_post(PostId(2)).unwrap();
    advance(&mut engine, &clock, 1_000);
    engine.like_post(PostId(3)).unwrap();

    assert_eq!(engine.state().combo, 3);
    assert_eq!(engine.state().streak, 2);

    // The reset fires 3000ms after the last action only
    let events = advance(&mut engine, &clock, 2_999);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ComboLapsed { .. })));
    assert_eq!(engine.state().combo, 3);

    let events = advance(&mut engine, &clock, 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ComboLapsed { .. }))
            .count(),
        1
    );
    assert_eq!(engine.state().combo, 0);
    assert_eq!(engine.state().streak, 2);
}

// ============================================================================
// Batch Actions
// ============================================================================

#[test]
fn test_batch_like_requires_perk() {
    let (mut engine, _) = fresh_engine();
    assert!(matches!(engine.batch_like(), Err(GameError::PerkMissing(_))));
    assert_eq!(engine.feed().unliked_count(), 3);
}

#[test]
fn test_batch_like_likes_every_unliked_post() {
    let (mut engine, _) = engine_with(|s| s.perks.batch_actions = true);

    assert_eq!(engine.batch_like().unwrap(), 3);
    assert_eq!(engine.feed().unliked_count(), 0);
    assert_eq!(engine.state().total_likes, 18);
    assert_eq!(engine.state().combo, 1);
    // 3 spent; at most one point comes back from the award
    assert!((17..=18).contains(&engine.state().energy));

    assert!(matches!(engine.batch_like(), Err(GameError::NothingToLike)));
}

#[test]
fn test_batch_like_refused_at_zero_energy() {
    let (mut engine, _) = engine_with(|s| {
        s.perks.batch_actions = true;
        s.energy = 0;
    });
    assert!(matches!(
        engine.batch_like(),
        Err(GameError::InsufficientEnergy { .. })
    ));
    assert_eq!(engine.feed().unliked_count(), 3);
}

#[test]
fn test_batch_like_caps_at_five_in_feed_order() {
    let (mut engine, clock) = engine_with(|s| s.perks.batch_actions = true);
    engine.start();

    // Four auto-posts land in front of the three seeded posts
    advance(&mut engine, &clock, 4 * 8_000);
    assert_eq!(engine.feed().len(), 7);

    assert_eq!(engine.batch_like().unwrap(), 5);
    let liked: Vec<bool> = engine.feed().iter().map(|p| p.liked).collect();
    assert_eq!(liked, vec![true, true, true, true, true, false, false]);
    assert!(!engine.feed().get(PostId(2)).unwrap().liked);
    assert!(!engine.feed().get(PostId(3)).unwrap().liked);
}

// ============================================================================
// Posting and Engagement
// ============================================================================

#[test]
fn test_post_cooldown_gates_posting() {
    let (mut engine, clock) = fresh_engine();
    assert!(engine.can_post());

    let id = engine
        .create_post("Personal Win", "Shipped it!", None)
        .unwrap();
    assert_eq!(engine.state().energy, 17);
    assert_eq!(engine.state().total_posts, 4);
    assert_eq!(engine.state().last_post_time, Some(START));

    let newest = engine.feed().iter().next().unwrap();
    assert_eq!(newest.id, id);
    assert_eq!(newest.origin, PostOrigin::Player);
    assert_eq!(newest.role, "Intern");
    assert_eq!(newest.author, "Alex Professional");
    assert!(!newest.engagement_resolved);

    let refused = engine.create_post("Personal Win", "Again!", None);
    assert!(matches!(
        refused,
        Err(GameError::CooldownActive { remaining_ms: 20_000 })
    ));
    assert_eq!(engine.state().energy, 17);
    assert_eq!(engine.cooldown_text(), "20s");

    clock.advance(19_500);
    assert_eq!(engine.cooldown_text(), "0.5s");
    assert!(!engine.can_post());

    clock.advance(500);
    assert!(engine.can_post());
    assert_eq!(engine.cooldown_text(), "0s");
}

#[test]
fn test_post_engagement_on_trend() {
    let (mut engine, clock) = fresh_engine();
    let ai = engine.data().topic("AI & Technology").cloned().unwrap();
    engine.set_trending(vec![ai.clone()]);

    let id = engine
        .create_post("Industry Insight", "AI is changing everything", Some(ai))
        .unwrap();
    assert_eq!(engine.engagement_delay(), 1_996);

    let events = advance(&mut engine, &clock, 1_995);
    assert!(events.is_empty());
    assert!(!engine.feed().get(id).unwrap().engagement_resolved);

    let events = advance(&mut engine, &clock, 1);
    let post = engine.feed().get(id).unwrap();
    assert!(post.engagement_resolved);
    // speed 1.2 (one-action combo) x trend 2.0
    assert!(post.likes >= 24 && post.likes < 144);
    assert!(post.comments >= 12 && post.comments < 60);

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PostResolved { trend: TrendFit::Trending, .. }
    )));
    let gained = events.iter().find_map(|e| match e {
        GameEvent::FollowersGained { amount, source, .. } => Some((*amount, source.clone())),
        _ => None,
    });
    let (amount, source) = gained.unwrap();
    assert!(amount >= 12);
    assert_eq!(source, "Post Engagement (Trending!)");
}

#[test]
fn test_trend_is_read_when_engagement_lands() {
    let (mut engine, clock) = fresh_engine();
    let ai = engine.data().topic("AI & Technology").cloned().unwrap();
    engine.set_trending(vec![ai.clone()]);

    let id = engine
        .create_post("Industry Insight", "AI is changing everything", Some(ai))
        .unwrap();

    // Trends move on before the engagement lands
    engine.set_trending(vec![Topic::named("Sustainability")]);
    let events = advance(&mut engine, &clock, 2_000);

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PostResolved { trend: TrendFit::OffTrend, .. }
    )));
    let post = engine.feed().get(id).unwrap();
    // speed 1.2 x off-trend 0.6
    assert!(post.likes >= 7 && post.likes <= 43);
}

#[test]
fn test_post_without_topic_resolves_at_half_rate() {
    let (mut engine, clock) = fresh_engine();
    engine.create_post("Personal Win", "Plain update", None).unwrap();

    let events = advance(&mut engine, &clock, 2_000);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PostResolved { trend: TrendFit::NoTopic, .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FollowersGained { source, .. } if source == "Post Engagement (Off-trend)"
    )));
}

#[test]
fn test_frequent_posting_eventually_goes_viral() {
    let (mut engine, clock) = engine_with(|s| {
        s.followers = 1_000;
        s.energy = 500;
        s.max_energy = 500;
        s.post_cooldown = 0;
        s.perks.viral_boost = true;
    });

    let mut viral_bonuses = Vec::new();
    for _ in 0..80 {
        engine.create_post("Personal Win", "Another win", None).unwrap();
        for event in advance(&mut engine, &clock, 2_000) {
            if let GameEvent::WentViral { bonus, .. } = event {
                viral_bonuses.push(bonus);
            }
        }
    }
    for event in advance(&mut engine, &clock, 5_000) {
        if let GameEvent::WentViral { bonus, .. } = event {
            viral_bonuses.push(bonus);
        }
    }

    assert!(!viral_bonuses.is_empty());
    assert!(viral_bonuses.iter().all(|b| (100..600).contains(b)));
    assert!(engine.notifications().has_unlocked("Post Went Viral!"));
}

// ============================================================================
// Upgrades
// ============================================================================

#[test]
fn test_cooldown_upgrades_respect_floors() {
    let (mut engine, _) = engine_with(|s| {
        s.energy = 500;
        s.max_energy = 500;
    });

    engine.purchase_upgrade("fast_posting").unwrap();
    assert_eq!(engine.state().post_cooldown, 15_000);
    assert_eq!(engine.state().energy, 475);

    for expected in [7_500, 3_750, 2_500, 2_500] {
        engine.purchase_upgrade("ultra_fast_posting").unwrap();
        assert_eq!(engine.state().post_cooldown, expected);
    }

    for _ in 0..3 {
        engine.purchase_upgrade("fast_posting").unwrap();
    }
    assert_eq!(engine.state().post_cooldown, 2_500);
    assert_eq!(engine.state().upgrades.count("fast_posting"), 4);
    assert_eq!(engine.state().upgrades.count("ultra_fast_posting"), 4);
}

#[test]
fn test_fast_posting_stops_at_five_seconds() {
    let (mut engine, _) = engine_with(|s| {
        s.energy = 200;
        s.max_energy = 200;
    });
    for expected in [15_000, 10_000, 5_000, 5_000] {
        engine.purchase_upgrade("fast_posting").unwrap();
        assert_eq!(engine.state().post_cooldown, expected);
    }
}

#[test]
fn test_purchase_refusals_change_nothing() {
    let (mut engine, _) = engine_with(|s| {
        s.energy = 200;
        s.max_energy = 200;
    });

    assert!(matches!(
        engine.purchase_upgrade("batch_actions"),
        Err(GameError::UpgradeLocked { .. })
    ));
    assert!(matches!(
        engine.purchase_upgrade("time_machine"),
        Err(GameError::UnknownUpgrade(_))
    ));
    assert_eq!(engine.state().energy, 200);
    assert!(!engine.state().perks.batch_actions);

    engine.award_followers(60, GainSource::Other("Test".into()));
    assert_eq!(engine.current_level().title, "Professional");
    let energy = engine.state().energy;

    engine.purchase_upgrade("batch_actions").unwrap();
    assert!(engine.state().perks.batch_actions);
    assert_eq!(engine.state().energy, energy - 50);
    assert!(!engine.can_purchase("batch_actions"));
    assert!(matches!(
        engine.purchase_upgrade("batch_actions"),
        Err(GameError::UpgradeOwned(_))
    ));
}

#[test]
fn test_purchase_unlocks_achievement() {
    let (mut engine, _) = fresh_engine();
    engine.purchase_upgrade("max_energy").unwrap();

    assert_eq!(engine.state().max_energy, 30);
    assert_eq!(engine.state().energy, 5);
    assert!(engine.notifications().has_unlocked("Purchased Energy Storage Upgrade!"));
    assert_eq!(engine.notifications().toasts().len(), 1);
}

#[test]
fn test_energy_efficiency_halves_costs() {
    let (mut engine, _) = engine_with(|s| s.perks.energy_efficiency = true);

    engine.create_post("Personal Win", "Half price", None).unwrap();
    assert_eq!(engine.state().energy, 18);

    engine.like_post(PostId(1)).unwrap();
    assert_eq!(engine.state().energy, 17);
}

#[test]
fn test_auto_engagement_pays_out_until_shutdown() {
    let (mut engine, clock) = engine_with(|s| {
        s.followers = 600;
        s.energy = 150;
        s.max_energy = 150;
    });
    engine.start();
    engine.purchase_upgrade("auto_engagement").unwrap();
    engine.drain_events();

    let events = advance(&mut engine, &clock, 10_000);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FollowersGained { amount: 1, source, .. } if source == "Auto-Engagement"
    )));
    assert_eq!(engine.state().followers, 601);

    advance(&mut engine, &clock, 10_000);
    assert_eq!(engine.state().followers, 602);

    engine.shutdown();
    advance(&mut engine, &clock, 30_000);
    assert_eq!(engine.state().followers, 602);
}

/// Buying auto-engagement on a stopped engine arms nothing; the payout
/// starts only once the engine is started again
#[test]
fn test_auto_engagement_bought_after_shutdown_stays_idle() {
    let (mut engine, clock) = engine_with(|s| {
        s.followers = 600;
        s.energy = 150;
        s.max_energy = 150;
    });
    engine.start();
    engine.shutdown();

    engine.purchase_upgrade("auto_engagement").unwrap();
    assert!(engine.state().perks.auto_engagement);
    assert!(!engine.is_running());

    advance(&mut engine, &clock, 30_000);
    assert_eq!(engine.state().followers, 600);

    engine.start();
    advance(&mut engine, &clock, 10_000);
    assert_eq!(engine.state().followers, 601);
}

// ============================================================================
// Promotions, Milestones and Victory
// ============================================================================

#[test]
fn test_promotion_achievement_is_delayed() {
    let (mut engine, clock) = engine_with(|s| s.followers = 95);

    engine.award_followers(10, GainSource::Other("Test".into()));
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Promoted { title, .. } if title == "Professional"
    )));
    assert!(!engine.notifications().has_unlocked("Promoted to Professional!"));

    advance(&mut engine, &clock, 500);
    assert!(engine.notifications().has_unlocked("Promoted to Professional!"));
    assert!(!engine.notifications().has_unlocked("First 100 Followers"));

    advance(&mut engine, &clock, 500);
    assert!(engine.notifications().has_unlocked("First 100 Followers"));

    // Toasts clear 3000ms after they appear
    advance(&mut engine, &clock, 3_000);
    assert!(engine.notifications().toasts().is_empty());
    assert_eq!(engine.notifications().history().len(), 2);
}

#[test]
fn test_level_jump_crosses_every_milestone_once() {
    let (mut engine, clock) = fresh_engine();

    engine.award_followers(2_000, GainSource::Other("Test".into()));
    assert_eq!(engine.current_level().title, "Director");
    let promotions = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Promoted { .. }))
        .count();
    assert_eq!(promotions, 1);

    engine.award_followers(0, GainSource::Other("Test".into()));
    advance(&mut engine, &clock, 1_000);

    let titles: Vec<&str> = engine
        .notifications()
        .history()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    for milestone in ["First 100 Followers", "Rising Influencer", "Thought Leader"] {
        assert_eq!(titles.iter().filter(|t| **t == milestone).count(), 1);
    }
    assert!(!titles.contains(&"Industry Expert"));
    assert!(titles.contains(&"Promoted to Director!"));
}

#[test]
fn test_victory_recorded_once() {
    let (mut engine, clock) = engine_with(|s| {
        s.followers = 7_999_999_990;
        s.game_start_time = START - 125_000;
    });
    assert!(engine.completion_summary().is_none());

    engine.award_followers(100, GainSource::Other("Test".into()));
    assert!(engine.state().followers >= 8_000_000_000);
    assert_eq!(engine.state().game_completion_time, Some(START));

    let mut victories = 0;
    victories += advance(&mut engine, &clock, 1_000)
        .iter()
        .filter(|e| matches!(e, GameEvent::Victory { .. }))
        .count();

    engine.award_followers(100, GainSource::Other("Test".into()));
    assert_eq!(engine.state().game_completion_time, Some(START));

    for event in advance(&mut engine, &clock, 10_000) {
        if let GameEvent::Victory { elapsed_ms, at } = event {
            victories += 1;
            assert_eq!(elapsed_ms, 125_000);
            assert_eq!(at, START + 2_000);
        }
    }
    assert_eq!(victories, 1);

    let history = engine.notifications().history();
    assert_eq!(
        history
            .iter()
            .filter(|a| a.title == "Victory! Global Domination Achieved!")
            .count(),
        1
    );

    let summary = engine.completion_summary().unwrap();
    assert_eq!(summary.completion_time, "2m 5s");
    assert_eq!(summary.total_posts, 3);
    assert!(engine.state().energy <= engine.state().max_energy);
}

// ============================================================================
// Background Timers
// ============================================================================

#[test]
fn test_auto_posts_fill_feed_up_to_capacity() {
    let (mut engine, clock) = fresh_engine();
    engine.start();
    assert_eq!(engine.trending().len(), 3);

    // One catch-up pump replays every missed tick in order
    clock.advance(25 * 8_000);
    engine.run_due();
    let events = engine.drain_events();

    let auto_posts = events
        .iter()
        .filter(|e| matches!(e, GameEvent::AutoPostPublished { .. }))
        .count();
    assert_eq!(auto_posts, 25);
    let rotations = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TrendsRotated { .. }))
        .count();
    assert_eq!(rotations, 2);

    assert_eq!(engine.feed().len(), 20);
    for post in engine.feed().iter() {
        assert_eq!(post.origin, PostOrigin::Simulated);
        assert_eq!(post.category, "Auto-Generated");
        assert!((20..220).contains(&post.likes));
        assert!((5..55).contains(&post.comments));
        assert!((2..32).contains(&post.shares));
    }
}

#[test]
fn test_trends_are_distinct_topics() {
    let (mut engine, _) = fresh_engine();
    engine.start();
    let names: Vec<&str> = engine.trending().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), 3);
    assert_ne!(names[0], names[1]);
    assert_ne!(names[1], names[2]);
    assert_ne!(names[0], names[2]);
}

#[test]
fn test_shutdown_stops_background_timers() {
    let (mut engine, clock) = fresh_engine();
    engine.start();
    engine.shutdown();
    engine.drain_events();

    let events = advance(&mut engine, &clock, 300_000);
    assert!(events.is_empty());
    assert_eq!(engine.feed().len(), 3);
    assert_eq!(clock.now(), START + 300_000);
}

#[test]
fn test_same_seed_same_session() {
    let play = || {
        let (mut engine, clock) = fresh_engine();
        engine.start();
        engine.like_post(PostId(1)).unwrap();
        engine.create_post("Personal Win", "Seeded", None).unwrap();
        advance(&mut engine, &clock, 40_000);
        (engine.state().followers, engine.feed().len(), engine.trending().to_vec())
    };
    assert_eq!(play(), play());
}
