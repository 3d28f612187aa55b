//! Match configuration
//!
//! Everything the simulation needs to know about its surroundings is passed in
//! through [`GameConfig`] when a match is built.

use std::time::Duration;

use crate::entities::{PLAYER_BOTTOM_OFFSET, PLAYER_HEIGHT};
use crate::error::ConfigError;

/// Horizontal margin kept free on both sides when placing new hostiles.
pub const SPAWN_MARGIN: i32 = 50;

/// Shortest play area that still holds the whole player sprite.
pub const MIN_PLAY_AREA_HEIGHT: i32 = PLAYER_BOTTOM_OFFSET + PLAYER_HEIGHT / 2;

/// Size of the play area in simulation pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArea {
    pub width: i32,
    pub height: i32,
}

impl PlayArea {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub play_area: PlayArea,
    /// Target simulation cadence while running
    pub frame_rate: u32,
    /// Redraw cadence while paused
    pub paused_frame_rate: u32,
    /// Minimum time between two successful shots
    pub shoot_cooldown: Duration,
    /// Horizontal pixels the player moves per tick
    pub player_speed: i32,
    /// Vertical pixels a projectile moves per tick (negative is up)
    pub projectile_speed: i32,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_area: PlayArea::new(800, 600),
            frame_rate: 60,
            paused_frame_rate: 5,
            shoot_cooldown: Duration::from_millis(250),
            player_speed: 8,
            projectile_speed: -10,
            starting_lives: 3,
        }
    }
}

impl GameConfig {
    /// Default tuning with the given play area
    pub fn for_play_area(width: i32, height: i32) -> Self {
        Self {
            play_area: PlayArea::new(width, height),
            ..Self::default()
        }
    }

    /// Duration of a single running frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Duration of a single paused frame
    pub fn paused_frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.paused_frame_rate.max(1)
    }

    /// Rejects configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PlayArea { width, height } = self.play_area;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyPlayArea { width, height });
        }
        // Hostiles are centred somewhere in [margin, width - margin]
        if width <= SPAWN_MARGIN * 2 {
            return Err(ConfigError::PlayAreaTooNarrow {
                width,
                min: SPAWN_MARGIN * 2 + 1,
            });
        }
        // The player sits near the bottom edge and must start fully on screen
        if height < MIN_PLAY_AREA_HEIGHT {
            return Err(ConfigError::PlayAreaTooShort {
                height,
                min: MIN_PLAY_AREA_HEIGHT,
            });
        }
        if self.frame_rate == 0 || self.paused_frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.player_speed <= 0 {
            return Err(ConfigError::InvalidPlayerSpeed(self.player_speed));
        }
        if self.projectile_speed >= 0 {
            return Err(ConfigError::InvalidProjectileSpeed(self.projectile_speed));
        }
        Ok(())
    }
}
