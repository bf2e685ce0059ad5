use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Stylize,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use simplelog::{Config, WriteLogger};

use crypto_snake::input::{ButtonPad, Command, SwipeTracker, command_for_key};
use crypto_snake::render::{RASTER_SIDE, rasterize_game, render_braille};
use crypto_snake::session::Session;
use crypto_snake::{GAME_TICK_MS, GameEngine, GameState};

#[derive(Parser)]
#[command(name = "crypto-snake")]
#[command(version, about = "Arcade snake that eats crypto tokens")]
struct Cli {
    /// Milliseconds between game ticks
    #[arg(long, default_value_t = GAME_TICK_MS)]
    tick_ms: u64,

    /// Fixed RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "crypto-snake.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything touches the terminal
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;
    info!("starting crypto-snake, tick {} ms", cli.tick_ms);

    // --- Init terminal ---
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let res = run(&mut terminal, &cli);

    // --- Restore terminal even on error ---
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor()?;

    res
}

/// Redraw at least this often while the clock is stopped.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: &Cli) -> Result<()> {
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(seed),
        None => GameEngine::new(),
    };
    let mut session = Session::new(engine, Duration::from_millis(cli.tick_ms.max(1)));
    let mut swipes = SwipeTracker::new();
    let mut pad = ButtonPad::default();

    loop {
        let now = Instant::now();
        session.pump(now);
        terminal.draw(|f| pad = draw(f, session.state()))?;

        let timeout = session.time_until_tick(now).unwrap_or(IDLE_POLL);
        if !event::poll(timeout)? {
            continue;
        }
        let cmd = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => command_for_key(key),
            Event::Mouse(ev) => pad.handle(ev).or_else(|| swipes.handle(ev)),
            _ => None,
        };
        match cmd {
            Some(Command::Quit) => break,
            Some(cmd) => session.submit(cmd),
            None => {}
        }
    }

    info!("quit with score {}", session.state().score);
    Ok(())
}

/// Draws one frame and returns where the arrow pad ended up.
fn draw(f: &mut Frame, state: &GameState) -> ButtonPad {
    let area = f.area();

    let title = format!(
        " CRYPTOSNAKE  •  score: {}  •  length: {}  •  {} ",
        state.score,
        state.len(),
        state.food.kind,
    );
    let braille = render_braille(&rasterize_game(state));

    // Braille packs 2x4 dots per char; the Block adds a one-cell border.
    let outer_w = (RASTER_SIDE as u16).div_ceil(2) + 2;
    let outer_h = (RASTER_SIDE as u16).div_ceil(4) + 2;
    let stack = centred(area, outer_w.max(ButtonPad::WIDTH), outer_h + ButtonPad::HEIGHT);
    let frame_area = Rect::new(stack.x, stack.y, outer_w.min(stack.width), outer_h.min(stack.height));
    let pad_area = Rect::new(
        stack.x + stack.width.saturating_sub(ButtonPad::WIDTH) / 2,
        stack.y + frame_area.height,
        ButtonPad::WIDTH.min(stack.width),
        stack.height.saturating_sub(frame_area.height),
    );

    let para = Paragraph::new(braille)
        .block(Block::default().borders(Borders::ALL).title(title.bold()))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(para, frame_area);
    f.render_widget(Paragraph::new(ButtonPad::LINES.join("\n")), pad_area);

    let banner = if !state.is_game_started {
        Some((
            "CRYPTOSNAKE".to_string(),
            "arrows / WASD / buttons / swipe to play  •  space to start".to_string(),
        ))
    } else if state.is_game_over {
        let heading = if state.is_won() { "You Win!" } else { "Game Over" };
        Some((
            heading.to_string(),
            format!("final score {}  •  r to play again  •  q to quit", state.score),
        ))
    } else {
        None
    };

    if let Some((heading, body)) = banner {
        let width = (body.chars().count() as u16 + 4).min(area.width);
        let popup = centred(area, width, 4);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(heading.bold())),
            popup,
        );
    }

    ButtonPad::new(pad_area.x, pad_area.y)
}

fn centred(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x.saturating_add(area.width.saturating_sub(w) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
