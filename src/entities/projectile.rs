use super::entity::{Bounds, Entity};
use crate::config::PlayArea;

pub const PROJECTILE_WIDTH: i32 = 4;
pub const PROJECTILE_HEIGHT: i32 = 15;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    /// Pixels per tick, negative moves toward the top
    pub speed: i32,
    alive: bool,
}

impl Projectile {
    /// Creates a projectile centred on (center_x, center_y)
    pub fn new(center_x: i32, center_y: i32, speed: i32) -> Self {
        let bounds = Bounds::from_center(center_x, center_y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        Self {
            x: bounds.x,
            y: bounds.y,
            speed,
            alive: true,
        }
    }

    /// Marks the projectile as spent after a hit
    pub fn consume(&mut self) {
        self.alive = false;
    }
}

impl Entity for Projectile {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn advance(&mut self, _area: &PlayArea) {
        if !self.alive {
            return;
        }
        self.y += self.speed;
        if self.bounds().bottom() < 0 {
            self.alive = false;
        }
    }
}
