use color_eyre::Result;
use rand::Rng;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::game::{Drawable, MatchController, MatchEvent, MatchState, MatchStatus, TickInput};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameOverLayout, GameRenderer, MainMenuLayout, RenderView, contains};

/// Which screen is showing, as far as input mapping is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

enum Mode {
    MainMenu,
    Match {
        game: Box<MatchController>,
        started: Instant,
    },
    GameOver(MatchStatus),
}

/// The outer loop: menus around a fresh [`MatchController`] per match.
pub struct App {
    running: bool,
    mode: Mode,
    config: GameConfig,
    /// Fixed seed for every match, random per match otherwise
    seed: Option<u64>,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    /// Terminal area of the last drawn frame, for click hit-testing
    last_area: Rect,
}

impl App {
    /// `config` must already be validated against the terminal size.
    pub fn new(
        config: GameConfig,
        seed: Option<u64>,
        input_manager: InputManager,
        audio_manager: AudioManager,
    ) -> Self {
        Self {
            running: true,
            mode: Mode::MainMenu,
            config,
            seed,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
            last_area: Rect::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        match &self.mode {
            Mode::MainMenu => Screen::MainMenu,
            Mode::Match { game, .. } => match game.state() {
                MatchState::Paused => Screen::Paused,
                _ => Screen::Playing,
            },
            Mode::GameOver(_) => Screen::GameOver,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            self.draw(terminal)?;

            // Poll input events and get actions
            let screen = self.screen();
            self.input_manager.poll_events(screen)?;
            let actions = self.input_manager.get_actions(screen);

            self.process_actions(&actions)?;

            let budget = if self.screen() == Screen::Paused {
                self.config.paused_frame_duration()
            } else {
                self.config.frame_duration()
            };
            if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("quitting");
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let renderer = &self.renderer;
        let mut drawn_area = self.last_area;
        match &self.mode {
            Mode::MainMenu => {
                terminal.draw(|frame| {
                    drawn_area = frame.area();
                    renderer.render(frame, &RenderView::MainMenu);
                })?;
            }
            Mode::Match { game, .. } => {
                let drawables: Vec<Drawable> = game.drawables().collect();
                let status = game.status();
                terminal.draw(|frame| {
                    drawn_area = frame.area();
                    renderer.render(
                        frame,
                        &RenderView::Match {
                            drawables: &drawables,
                            status,
                        },
                    );
                })?;
            }
            Mode::GameOver(status) => {
                let status = *status;
                terminal.draw(|frame| {
                    drawn_area = frame.area();
                    renderer.render(frame, &RenderView::GameOver { status });
                })?;
            }
        }
        self.last_area = drawn_area;
        Ok(())
    }

    /// Process input actions for the current screen, then advance the match
    fn process_actions(&mut self, actions: &[InputAction]) -> Result<()> {
        let mut tick_input = TickInput::default();

        for action in actions {
            match *action {
                InputAction::Quit => {
                    self.running = false;
                    return Ok(());
                }
                InputAction::Play | InputAction::Retry => self.start_match()?,
                InputAction::MainMenu => self.mode = Mode::MainMenu,
                InputAction::TogglePause => {
                    if let Mode::Match { game, .. } = &mut self.mode {
                        game.toggle_pause();
                    }
                }
                InputAction::Click { column, row } => self.handle_click(column, row)?,
                InputAction::MoveLeft => tick_input.move_left = true,
                InputAction::MoveRight => tick_input.move_right = true,
                InputAction::Fire => tick_input.fire = true,
            }
        }

        self.update_match(tick_input);
        Ok(())
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Result<()> {
        match self.mode {
            Mode::MainMenu => {
                let layout = MainMenuLayout::new(self.last_area);
                if contains(layout.play, column, row) {
                    self.start_match()?;
                } else if contains(layout.quit, column, row) {
                    self.running = false;
                }
            }
            Mode::GameOver(_) => {
                let layout = GameOverLayout::new(self.last_area);
                if contains(layout.retry, column, row) {
                    self.start_match()?;
                } else if contains(layout.main_menu, column, row) {
                    self.mode = Mode::MainMenu;
                }
            }
            Mode::Match { .. } => {}
        }
        Ok(())
    }

    fn start_match(&mut self) -> Result<()> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("starting match with seed {seed}");
        let game = MatchController::new(self.config.clone(), seed)?;
        self.mode = Mode::Match {
            game: Box::new(game),
            started: Instant::now(),
        };
        Ok(())
    }

    fn update_match(&mut self, mut input: TickInput) {
        let Mode::Match { game, started } = &mut self.mode else {
            return;
        };
        input.now = started.elapsed();

        let report = game.tick(&input);
        self.audio_manager.play_events(&report.events);

        if report
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::GameOver { .. }))
        {
            self.mode = Mode::GameOver(report.status);
        }
    }
}

/// Frames per second implied by a frame duration, for logging
pub fn frames_per_second(frame: Duration) -> u32 {
    if frame.is_zero() {
        return 0;
    }
    (Duration::from_secs(1).as_micros() / frame.as_micros().max(1)) as u32
}
