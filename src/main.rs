//! GamedIn - Entry Point
//!
//! Interactive terminal session. Commands are read from stdin while a pump
//! interval fires due timers in real time, so engagement, auto-posts and
//! achievements keep arriving between commands.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use gamedin::core::clock::SystemClock;
use gamedin::core::config::EngineConfig;
use gamedin::core::error::Result;
use gamedin::core::types::PostId;
use gamedin::data::GameData;
use gamedin::progression::{Engine, GameEvent, PostOption};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

const DATA_PATH: &str = "data/game_data.toml";
const CONFIG_PATH: &str = "data/engine.toml";
const PUMP_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gamedin=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("GamedIn starting...");

    let data = load_data()?;
    let config = load_config()?;
    let seed = rand::random::<u64>();

    let mut engine = Engine::new(data, config, SystemClock::new(), seed)?;
    engine.start();

    let rt = Runtime::new()?;
    rt.block_on(run_session(&mut engine))?;

    engine.shutdown();
    let state = engine.state();
    println!(
        "\nGoodbye! {} followers as {}.",
        state.followers,
        engine.current_level().title
    );
    Ok(())
}

fn load_data() -> Result<GameData> {
    let path = Path::new(DATA_PATH);
    if path.exists() {
        tracing::info!("Loading game data from {}", DATA_PATH);
        GameData::load_from_toml(path)
    } else {
        Ok(GameData::default())
    }
}

fn load_config() -> Result<EngineConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        tracing::info!("Loading engine config from {}", CONFIG_PATH);
        EngineConfig::load_from_toml(path)
    } else {
        Ok(EngineConfig::default())
    }
}

async fn run_session(engine: &mut Engine) -> Result<()> {
    println!("\n=== GAMEDIN ===");
    println!("Climb from Intern to global domination, one post at a time.");
    print_help(engine.config());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pump = tokio::time::interval(PUMP_INTERVAL);
    let mut options: Vec<PostOption> = Vec::new();

    prompt()?;
    loop {
        tokio::select! {
            _ = pump.tick() => {
                engine.run_due();
                let events = engine.drain_events();
                if !events.is_empty() {
                    for event in &events {
                        print_event(event);
                    }
                    prompt()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_command(engine, line.trim(), &mut options) {
                    break;
                }
                for event in engine.drain_events() {
                    print_event(&event);
                }
                prompt()?;
            }
        }
    }
    Ok(())
}

/// Returns false when the session should end
fn handle_command(engine: &mut Engine, input: &str, options: &mut Vec<PostOption>) -> bool {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let arg = parts.next();

    match command {
        "quit" | "q" => return false,
        "help" | "h" => print_help(engine.config()),
        "status" | "s" => display_status(engine),
        "feed" | "f" => display_feed(engine),
        "shop" => display_shop(engine),
        "trends" => display_trends(engine),
        "like" | "comment" | "share" => {
            let Some(id) = arg.and_then(|a| a.parse::<u64>().ok()) else {
                println!("Usage: {} <post id>", command);
                return true;
            };
            let result = match command {
                "like" => engine.like_post(PostId(id)),
                "comment" => engine.comment_post(PostId(id)),
                _ => engine.share_post(PostId(id)),
            };
            match result {
                Ok(gained) => println!("+{} followers", gained),
                Err(e) => println!("Refused: {}", e),
            }
        }
        "batch" => match engine.batch_like() {
            Ok(n) => println!("Liked {} posts", n),
            Err(e) => println!("Refused: {}", e),
        },
        "buy" => match arg {
            Some(id) => match engine.purchase_upgrade(id) {
                Ok(()) => println!("Purchased {}", id),
                Err(e) => println!("Refused: {}", e),
            },
            None => println!("Usage: buy <upgrade id>"),
        },
        "post" | "p" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            None => {
                *options = engine.post_options(3);
                for (i, option) in options.iter().enumerate() {
                    let topic = option
                        .topic
                        .as_ref()
                        .map(|t| format!(" {} {}", t.emoji, t.name))
                        .unwrap_or_default();
                    println!("  {}) [{}{}] {}", i + 1, option.category, topic, option.content);
                }
                println!("Choose with: post <n>   (cooldown: {})", engine.cooldown_text());
            }
            Some(choice) => {
                let Some(option) = choice.checked_sub(1).and_then(|i| options.get(i)).cloned() else {
                    println!("No such option; run `post` first");
                    return true;
                };
                match engine.create_post(option.category, option.content, option.topic) {
                    Ok(id) => {
                        println!("Published post {}", id.0);
                        options.clear();
                    }
                    Err(e) => println!("Refused: {}", e),
                }
            }
        },
        _ => println!("Unknown command. Type `help` for the list."),
    }
    true
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help(config: &EngineConfig) {
    println!("{}", help_text(config));
}

/// Command list with energy costs taken from the active config
fn help_text(config: &EngineConfig) -> String {
    [
        String::new(),
        "Commands:".to_string(),
        "  status / s          - Show your profile".to_string(),
        "  feed / f            - Show the feed".to_string(),
        format!("  like <id>           - Like a post ({} energy)", config.like_cost),
        format!("  comment <id>        - Comment on a post ({} energy)", config.comment_cost),
        format!("  share <id>          - Share a post ({} energy)", config.share_cost),
        format!(
            "  batch               - Like up to {} posts at once",
            config.batch_like_limit
        ),
        format!(
            "  post / p [n]        - List post ideas, or publish idea n ({} energy)",
            config.post_cost
        ),
        "  shop                - List upgrades".to_string(),
        "  buy <id>            - Buy an upgrade".to_string(),
        "  trends              - Show trending topics".to_string(),
        "  quit / q            - Exit".to_string(),
    ]
    .join("\n")
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::FollowersGained { amount, source, .. } => {
            println!("  +{} followers ({})", amount, source);
        }
        GameEvent::WentViral { bonus, .. } => println!("  🔥 VIRAL! +{} followers", bonus),
        GameEvent::AchievementUnlocked { title, icon, .. } => println!("  {} {}", icon, title),
        GameEvent::Promoted { title, .. } => println!("  Promoted to {}", title),
        GameEvent::PostResolved {
            post_id,
            likes,
            comments,
            ..
        } => println!("  Post {} landed: {} likes, {} comments", post_id.0, likes, comments),
        GameEvent::AutoPostPublished { post_id, author, .. } => {
            println!("  New post {} from {}", post_id.0, author);
        }
        GameEvent::TrendsRotated { topics, .. } => println!("  Trending: {}", topics.join(", ")),
        GameEvent::ComboLapsed { .. } => {}
        GameEvent::Victory { elapsed_ms, .. } => {
            println!("\n=== GLOBAL DOMINATION ===");
            println!("Won in {}s", elapsed_ms / 1_000);
        }
    }
}

fn display_status(engine: &Engine) {
    let state = engine.state();
    let level = engine.current_level();
    println!();
    println!("{} {} - {}", level.icon, state.name, level.title);
    println!("  Followers: {}", state.followers);
    println!(
        "  Progress to {}: {:.1}%",
        engine.next_level().title,
        engine.level_progress()
    );
    println!(
        "  Energy: {}/{} (+{:.2})",
        state.energy, state.max_energy, state.fractional_energy
    );
    println!(
        "  Combo: {}  Streak: {}  Speed: {:.1}x",
        state.combo,
        state.streak,
        engine.speed_multiplier()
    );
    println!("  Post cooldown: {}", engine.cooldown_text());
    println!(
        "  Posts: {}  Likes: {}  Comments: {}",
        state.total_posts, state.total_likes, state.total_comments
    );
    if let Some(summary) = engine.completion_summary() {
        println!("  Completed in {}", summary.completion_time);
    }
    println!();
}

fn display_feed(engine: &Engine) {
    println!();
    for post in engine.feed().iter().take(10) {
        let marks = match (post.liked, post.commented) {
            (true, true) => " [liked, commented]",
            (true, false) => " [liked]",
            (false, true) => " [commented]",
            (false, false) => "",
        };
        println!("#{} {} ({}){}", post.id.0, post.author, post.role, marks);
        println!("    {}", post.content);
        if post.engagement_resolved {
            println!(
                "    {} likes  {} comments  {} shares",
                post.likes, post.comments, post.shares
            );
        } else {
            println!("    engagement pending...");
        }
    }
    println!();
}

fn display_shop(engine: &Engine) {
    println!();
    for upgrade in &engine.data().upgrades {
        let owned = engine.state().upgrades.count(&upgrade.id);
        let status = if engine.can_purchase(&upgrade.id) {
            "available"
        } else if owned > 0 && !upgrade.repeatable {
            "owned"
        } else {
            "locked"
        };
        println!(
            "{} {:<20} {:>4} energy  [{}, {}] {}",
            upgrade.icon, upgrade.id, upgrade.cost, upgrade.unlock_level, status, upgrade.description
        );
    }
    println!();
}

fn display_trends(engine: &Engine) {
    println!();
    for topic in engine.trending() {
        println!("  {} {} ({})", topic.emoji, topic.name, topic.category);
    }
    println!();
}
