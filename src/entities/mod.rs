mod enemy;
mod entity;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Hostile, HostileKind, SPAWN_CENTER_Y};
pub use entity::{Bounds, Entity};
pub use player::{Actor, Direction, PLAYER_BOTTOM_OFFSET, PLAYER_HEIGHT, PLAYER_WIDTH};
pub use projectile::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH, Projectile};
