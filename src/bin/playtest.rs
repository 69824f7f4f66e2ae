//! Headless Playtest Runner
//!
//! Plays a seeded session on a manual clock with a greedy strategy and
//! reports how far the player got. Useful for tuning pacing constants.

use clap::Parser;
use serde::Serialize;

use gamedin::core::clock::{Clock, ManualClock};
use gamedin::core::config::EngineConfig;
use gamedin::core::error::Result;
use gamedin::data::GameData;
use gamedin::progression::{Engine, GameEvent};
use tracing_subscriber::EnvFilter;

/// Headless Playtest Runner - greedy autoplayer on simulated time
#[derive(Parser, Debug)]
#[command(name = "playtest")]
#[command(about = "Play a seeded GamedIn session and report progression")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated minutes to play
    #[arg(long, default_value_t = 30)]
    minutes: u64,

    /// Simulated milliseconds between player decisions
    #[arg(long, default_value_t = 500)]
    step_ms: u64,

    /// Game data TOML (compiled-in defaults when omitted)
    #[arg(long)]
    data: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every game event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct Promotion {
    title: String,
    at_seconds: f64,
}

#[derive(Serialize)]
struct PlaytestReport {
    seed: u64,
    simulated_seconds: u64,
    followers: u64,
    level: String,
    energy: u32,
    max_energy: u32,
    total_posts: u64,
    total_likes: u64,
    total_comments: u64,
    actions_taken: u64,
    actions_refused: u64,
    viral_posts: u64,
    upgrades: Vec<String>,
    promotions: Vec<Promotion>,
    achievements: Vec<String>,
    completion_time: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gamedin=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let data = match &args.data {
        Some(path) => GameData::load_from_toml(path)?,
        None => GameData::default(),
    };

    let clock = ManualClock::new();
    let mut engine = Engine::new(data, EngineConfig::default(), clock.clone(), seed)?;
    engine.start();

    let start = clock.now();
    let end = start + args.minutes * 60_000;
    let step = args.step_ms.max(1);

    let mut actions_taken = 0;
    let mut actions_refused = 0;
    let mut viral_posts = 0;
    let mut promotions = Vec::new();

    while clock.now() < end {
        clock.advance(step);
        engine.run_due();

        if play_turn(&mut engine) {
            actions_taken += 1;
        } else {
            actions_refused += 1;
        }

        for event in engine.drain_events() {
            if args.verbose {
                eprintln!("[{:>8}ms] {:?}", clock.now() - start, event);
            }
            match event {
                GameEvent::WentViral { .. } => viral_posts += 1,
                GameEvent::Promoted { title, at } => promotions.push(Promotion {
                    title,
                    at_seconds: (at - start) as f64 / 1_000.0,
                }),
                _ => {}
            }
        }

        if engine.completion_summary().is_some() {
            break;
        }
    }
    engine.shutdown();

    let state = engine.state();
    let report = PlaytestReport {
        seed,
        simulated_seconds: (clock.now() - start) / 1_000,
        followers: state.followers,
        level: engine.current_level().title.clone(),
        energy: state.energy,
        max_energy: state.max_energy,
        total_posts: state.total_posts,
        total_likes: state.total_likes,
        total_comments: state.total_comments,
        actions_taken,
        actions_refused,
        viral_posts,
        upgrades: engine
            .data()
            .upgrades
            .iter()
            .filter(|u| state.upgrades.owns(&u.id))
            .map(|u| format!("{} x{}", u.id, state.upgrades.count(&u.id)))
            .collect(),
        promotions,
        achievements: engine
            .notifications()
            .history()
            .iter()
            .map(|a| a.title.clone())
            .collect(),
        completion_time: engine.completion_summary().map(|s| s.completion_time),
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// One greedy decision. Returns true if an action went through.
///
/// Priority: the most expensive affordable upgrade, then a post, then batch
/// likes, then single likes, comments and shares on the newest posts.
fn play_turn(engine: &mut Engine<ManualClock>) -> bool {
    let affordable = engine
        .data()
        .upgrades
        .iter()
        .filter(|u| engine.can_purchase(&u.id))
        .max_by_key(|u| u.cost)
        .map(|u| u.id.clone());
    if let Some(id) = affordable {
        if engine.purchase_upgrade(&id).is_ok() {
            return true;
        }
    }

    if engine.can_post() {
        if let Some(option) = engine.post_options(1).into_iter().next() {
            if engine
                .create_post(option.category, option.content, option.topic)
                .is_ok()
            {
                return true;
            }
        }
    }

    if engine.state().perks.batch_actions && engine.batch_like().is_ok() {
        return true;
    }

    let unliked = engine.feed().iter().find(|p| !p.liked).map(|p| p.id);
    if let Some(id) = unliked {
        if engine.like_post(id).is_ok() {
            return true;
        }
    }

    let uncommented = engine.feed().iter().find(|p| !p.commented).map(|p| p.id);
    if let Some(id) = uncommented {
        if engine.comment_post(id).is_ok() {
            return true;
        }
    }

    let newest = engine.feed().iter().next().map(|p| p.id);
    newest.map_or(false, |id| engine.share_post(id).is_ok())
}

fn print_text(report: &PlaytestReport) {
    println!("Playtest Result");
    println!("===============");
    println!("Seed: {}", report.seed);
    println!("Simulated: {}s", report.simulated_seconds);
    println!("Followers: {} ({})", report.followers, report.level);
    println!("Energy: {}/{}", report.energy, report.max_energy);
    println!(
        "Posts: {}  Likes: {}  Comments: {}",
        report.total_posts, report.total_likes, report.total_comments
    );
    println!(
        "Actions: {} taken, {} refused; {} viral posts",
        report.actions_taken, report.actions_refused, report.viral_posts
    );
    println!();
    println!("Promotions:");
    for promotion in &report.promotions {
        println!("  {:>8.1}s  {}", promotion.at_seconds, promotion.title);
    }
    println!("Upgrades: {}", report.upgrades.join(", "));
    println!("Achievements: {}", report.achievements.len());
    if let Some(time) = &report.completion_time {
        println!("Victory in {}", time);
    }
}
