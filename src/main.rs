//! Demo shell: builds the sample portfolio page, mounts the interaction
//! engine over it, replays a scripted trace of environment events, and
//! reports the final page state.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use motion::{InputEvent, Key, MotionConfig};

use folio_motion::demo;

#[derive(Parser)]
#[command(name = "folio-motion")]
#[command(about = "Headless portfolio-page interactivity, replayed deterministically")]
struct Cli {
    /// Viewport width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Tuning overrides (TOML); a missing file keeps the stock values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log state transitions and style writes while replaying
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let config = match &cli.config {
        Some(path) => MotionConfig::load(path)?,
        None => MotionConfig::default(),
    };

    let (mut engine, page) = demo::mount(cli.width, cli.height, config)?;
    println!("folio-motion — {}x{} viewport", cli.width, cli.height);

    // ── Replay ──────────────────────────────────────────────────────────
    // Load, read down the page section by section, hover a card, jump
    // back up through the sidebar, and dismiss it again.
    let mut now = 0u64;

    engine.dispatch(InputEvent::Load);
    now += 200;
    engine.advance_to(now);

    let stops = [
        cli.height * 0.4,
        page.section_top(0, cli.height) + 50.0,
        page.section_top(1, cli.height) + 50.0,
        page.section_top(2, cli.height) + 50.0,
        page.section_top(3, cli.height) + 50.0,
    ];
    for to in stops {
        engine.dispatch(InputEvent::Scroll { to });
        now += 400;
        engine.advance_to(now);
    }

    if let Some(&card) = page.timeline_items.first() {
        engine.dispatch(InputEvent::PointerEnter { target: card });
        engine.dispatch(InputEvent::PointerLeave { target: card });
    }

    // Back to the top of the about section via its nav link.
    engine.dispatch(InputEvent::Click {
        target: page.nav_links[0],
    });
    now += 400;
    engine.advance_to(now);

    // Open the sidebar, think better of it.
    engine.dispatch(InputEvent::Click { target: page.toggle });
    engine.dispatch(InputEvent::KeyDown { key: Key::Escape });

    // Let any counters still mid-ramp run out.
    now += 1000;
    engine.advance_to(now);

    // ── Report ──────────────────────────────────────────────────────────
    let doc = engine.doc();
    let active = engine
        .state()
        .active_link
        .and_then(|link| doc.attribute(link, "href"))
        .unwrap_or("none");
    let counters: Vec<String> = page
        .future_numbers
        .iter()
        .map(|&n| doc.text_content(n))
        .collect();

    println!("\nfinal state after {now} ms:");
    println!("  active link      {active}");
    println!("  sidebar open     {}", engine.state().sidebar_open);
    println!("  scroll offset    {}", engine.viewport().scroll_y);
    println!("  revealed blocks  {}", engine.revealed_count());
    println!("  counters         {}", counters.join(" "));
    println!(
        "  body opacity     {}",
        doc.style(page.body, "opacity").unwrap_or("-")
    );

    Ok(())
}

fn init_tracing(trace: bool) {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| if trace { "debug".into() } else { "warn".into() });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
