use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use ballotbird::audio::{AudioSink, Muted, TerminalBell};
use ballotbird::build_info;
use ballotbird::cli::{self, Command, USAGE};
use ballotbird::config::GameConfig;
use ballotbird::content::load_or_fallback;
use ballotbird::engine::{GameEvent, GameLoop, GameState, Phase, SystemClock};
use ballotbird::logging;
use ballotbird::results::{JsonResultLog, MemorySink, ResultSink};
use ballotbird::ui::game_common::{render_overlay, OverlayTone};
use ballotbird::ui::render_quiz;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

type Term = Terminal<CrosstermBackend<Stdout>>;

const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> anyhow::Result<()> {
    let overrides = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(overrides)) => overrides,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'ballotbird --help' for usage.");
            std::process::exit(1);
        }
    };

    let mut config = GameConfig::load();
    config.apply(overrides);

    if let Err(e) = logging::setup_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    info!(version = %build_info::version_line(), "Starting");

    let mut terminal = setup_terminal().context("setting up terminal")?;
    let result = run(&mut terminal, &config);
    restore_terminal(&mut terminal).context("restoring terminal")?;
    result
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn run(terminal: &mut Term, config: &GameConfig) -> anyhow::Result<()> {
    terminal.draw(|f| {
        render_overlay(
            f,
            f.size(),
            OverlayTone::Neutral,
            "BALLOT BIRD",
            &["Loading chapters...".to_string()],
            "",
        )
    })?;

    let supplier = config.content.supplier();
    let chapters = load_or_fallback(supplier.as_ref(), &config.profile);
    let state = GameState::new(chapters, config.engine.clone()).context("starting game")?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = GameLoop::new(state, SystemClock::new(), rng);

    let mut audio: Box<dyn AudioSink> = if config.muted {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(io::stdout()))
    };
    let mut results: Box<dyn ResultSink> = match JsonResultLog::default_location() {
        Ok(log) => Box::new(log),
        Err(e) => {
            warn!(error = %e, "Result log unavailable, keeping results in memory");
            Box::new(MemorySink::default())
        }
    };

    game.finish_loading();

    while game.is_running() {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => game.stop(),
                    KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => game.queue_input(),
                    _ => {}
                },
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    game.queue_input()
                }
                _ => {}
            }
        }
        if !game.is_running() {
            break;
        }

        for game_event in game.step() {
            if let Some(cue) = game_event.cue() {
                if let Err(e) = audio.play(cue) {
                    warn!(error = %e, "Could not play cue");
                }
            }
            if let GameEvent::GameCompleted(summary) = game_event {
                if let Err(e) = results.record(summary) {
                    warn!(error = %e, "Could not record result");
                }
            }
        }

        let snapshot = game.snapshot();
        terminal.draw(|f| render_quiz(f, f.size(), &snapshot))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }

    if game.state().phase != Phase::GameComplete {
        let summary = game.summary();
        info!(
            total_correct = summary.score.total_correct,
            display_score = summary.display_score,
            "Quit before finishing"
        );
        if let Err(e) = results.record(summary) {
            warn!(error = %e, "Could not record result");
        }
    }
    Ok(())
}
