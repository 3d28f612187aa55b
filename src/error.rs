use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("play area must have a positive size, got {width}x{height}")]
    EmptyPlayArea { width: i32, height: i32 },

    #[error("play area is {width} px wide, need at least {min} px to place hostiles")]
    PlayAreaTooNarrow { width: i32, min: i32 },

    #[error("play area is {height} px tall, need at least {min} px to fit the player")]
    PlayAreaTooShort { height: i32, min: i32 },

    #[error("frame rates must be non-zero")]
    ZeroFrameRate,

    #[error("a match needs at least one starting life")]
    NoLives,

    #[error("player speed must be positive, got {0}")]
    InvalidPlayerSpeed(i32),

    #[error("projectile speed must be negative (upward), got {0}")]
    InvalidProjectileSpeed(i32),
}

/// Raised when a raw hostile tier outside 0..=2 is converted
#[derive(Debug, Error, PartialEq, Eq)]
#[error("hostile type {0} is out of range (expected 0, 1 or 2)")]
pub struct InvalidHostileKind(pub u8);
