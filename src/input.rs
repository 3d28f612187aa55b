use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::app::Screen;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
    Play,
    Retry,
    MainMenu,
    Quit,
    /// Left click at a terminal cell
    Click { column: u16, row: u16 },
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal sends key release events
    reports_releases: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    /// Without release events every press (or auto-repeat) counts for a single frame.
    pub fn new(reports_releases: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_releases,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, screen: Screen) -> color_eyre::Result<()> {
        self.begin_frame();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            self.handle_event(event::read()?, screen);
        }

        Ok(())
    }

    /// Clears the previous frame's one-shot actions
    fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        if !self.reports_releases {
            self.key_state = KeyState::default();
        }
    }

    /// Feeds one terminal event through the key and mouse mappings
    pub fn handle_event(&mut self, event: Event, screen: Screen) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, screen),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            self.oneshot_actions.push(InputAction::Click {
                column: mouse_event.column,
                row: mouse_event.row,
            });
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    fn handle_key_event(&mut self, key_event: KeyEvent, screen: Screen) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, screen),
            KeyEventKind::Repeat => {
                if screen == Screen::Playing {
                    self.handle_held_key(key_event.code);
                }
            }
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    /// Handles key press events
    fn handle_key_press(&mut self, key_event: KeyEvent, screen: Screen) {
        // Check for quit keys first (works in any state)
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            || (key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // State-specific one-shot actions
        let action = match screen {
            Screen::MainMenu => match key_event.code {
                KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::Play),
                _ => None,
            },
            Screen::Playing | Screen::Paused => match key_event.code {
                KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                    Some(InputAction::TogglePause)
                }
                _ => None,
            },
            Screen::GameOver => match key_event.code {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                    Some(InputAction::Retry)
                }
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::MainMenu),
                _ => None,
            },
        };
        if let Some(action) = action {
            self.oneshot_actions.push(action);
            return;
        }

        // Continuous action keys (only tracked while playing)
        if screen == Screen::Playing {
            self.handle_held_key(key_event.code);
        }
    }

    fn handle_held_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = true;
            }
            _ => {}
        }
    }

    /// Handles key release events
    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, screen: Screen) -> Vec<InputAction> {
        let mut actions = Vec::new();

        // Add one-shot actions first
        actions.extend_from_slice(&self.oneshot_actions);

        // Add continuous actions based on held keys (only while playing)
        if screen == Screen::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }
}
