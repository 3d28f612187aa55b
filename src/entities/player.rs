use std::time::Duration;

use super::entity::{Bounds, Entity};
use super::projectile::Projectile;
use crate::config::{GameConfig, PlayArea};

pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 30;
/// Distance from the bottom edge to the player's centre line
pub const PLAYER_BOTTOM_OFFSET: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub lives: u32,
    pub cooldown: Duration,
    /// Match time of the last successful shot
    pub last_shot: Duration,
    pub projectile_speed: i32,
    pub projectiles: Vec<Projectile>,
}

impl Actor {
    /// Places the player centred near the bottom of the play area
    pub fn new(config: &GameConfig) -> Self {
        let area = config.play_area;
        let bounds = Bounds::from_center(
            area.width / 2,
            area.height - PLAYER_BOTTOM_OFFSET,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        );
        Self {
            x: bounds.x,
            y: bounds.y,
            speed: config.player_speed,
            lives: config.starting_lives,
            cooldown: config.shoot_cooldown,
            last_shot: Duration::ZERO,
            projectile_speed: config.projectile_speed,
            projectiles: Vec::new(),
        }
    }

    /// Moves one step sideways without leaving the play area
    pub fn shift(&mut self, direction: Direction, area: &PlayArea) {
        let step = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
        };
        let max_x = (area.width - PLAYER_WIDTH).max(0);
        self.x = (self.x + step).clamp(0, max_x);
    }

    pub fn can_fire(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_shot) > self.cooldown
    }

    /// Fires from the top-centre if the cooldown has elapsed.
    /// Returns whether a projectile was spawned.
    pub fn shoot(&mut self, now: Duration) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        let bounds = self.bounds();
        self.projectiles.push(Projectile::new(
            bounds.center_x(),
            bounds.top(),
            self.projectile_speed,
        ));
        self.last_shot = now;
        true
    }

    /// Loses one life. Returns whether the actor is still alive.
    pub fn take_hit(&mut self) -> bool {
        debug_assert!(self.lives > 0, "hit taken after the last life was lost");
        self.lives = self.lives.saturating_sub(1);
        self.is_alive()
    }

    pub fn advance_projectiles(&mut self, area: &PlayArea) {
        for projectile in &mut self.projectiles {
            projectile.advance(area);
        }
    }

    pub fn prune_projectiles(&mut self) {
        self.projectiles.retain(|p| p.is_alive());
    }
}

impl Entity for Actor {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// The actor only moves on input
    fn advance(&mut self, _area: &PlayArea) {}
}
