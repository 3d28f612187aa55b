use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;

use galactic_defender::{
    App, AudioManager, GameConfig, InputManager, frames_per_second, play_area_for_terminal,
};

const LOG_FILE: &str = "galactic-defender.log";
const SEED_ENV: &str = "GALACTIC_DEFENDER_SEED";

/// Logs go to a file; the terminal belongs to the game.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed_from_env() -> Result<Option<u64>> {
    match std::env::var(SEED_ENV) {
        Ok(value) => {
            let seed = value
                .trim()
                .parse()
                .wrap_err_with(|| format!("{SEED_ENV} must be an unsigned integer"))?;
            Ok(Some(seed))
        }
        Err(_) => Ok(None),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    // The play area is fixed from the terminal size at startup
    let (columns, rows) = crossterm::terminal::size()?;
    let (width, height) = play_area_for_terminal(columns, rows);
    let config = GameConfig::for_play_area(width, height);
    config
        .validate()
        .wrap_err_with(|| format!("terminal of {columns}x{rows} cells is too small to play"))?;
    let seed = seed_from_env()?;
    log::info!(
        "starting with {}x{} px play area at {} fps (paused {} fps), seed {:?}",
        width,
        height,
        frames_per_second(config.frame_duration()),
        frames_per_second(config.paused_frame_duration()),
        seed
    );

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("keyboard enhancement supported: {supports_keyboard_enhancement}");

    let audio_manager = AudioManager::new();

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(
        config,
        seed,
        InputManager::new(supports_keyboard_enhancement),
        audio_manager,
    );
    let result = app.run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("game loop failed: {err:?}");
    }
    result
}
