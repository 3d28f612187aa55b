// Public API used by the binary and the integration tests
pub use app::{App, Screen, frames_per_second};
pub use audio::{AudioManager, Sound};
pub use collision::{CollisionReport, CollisionResolver};
pub use config::{GameConfig, PlayArea};
pub use entities::{
    Actor, Bounds, Direction, Entity, Hostile, HostileKind, PLAYER_HEIGHT, PLAYER_WIDTH,
    Projectile,
};
pub use error::{ConfigError, InvalidHostileKind};
pub use game::{
    DrawKind, Drawable, MatchController, MatchEvent, MatchState, MatchStatus, TickInput,
    TickReport,
};
pub use input::{InputAction, InputManager};
pub use renderer::play_area_for_terminal;
pub use wave::{WaveDirector, wave_size};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod wave;
