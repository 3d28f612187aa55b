use rand::Rng;

use super::entity::{Bounds, Entity};
use crate::config::PlayArea;
use crate::error::InvalidHostileKind;

/// Spawn height for new hostiles (centre line, above the top edge)
pub const SPAWN_CENTER_Y: i32 = -50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostileKind {
    Scout,
    Raider,
    Brute,
}

impl HostileKind {
    pub const ALL: [HostileKind; 3] = [HostileKind::Scout, HostileKind::Raider, HostileKind::Brute];

    /// Ordinal tier, 0 for the weakest
    pub fn tier(&self) -> u8 {
        match self {
            HostileKind::Scout => 0,
            HostileKind::Raider => 1,
            HostileKind::Brute => 2,
        }
    }

    pub fn max_health(&self) -> i32 {
        i32::from(self.tier()) + 1
    }

    pub fn points(&self) -> u32 {
        10 * (u32::from(self.tier()) + 1)
    }

    /// Sprite footprint (width, height)
    pub fn size(&self) -> (i32, i32) {
        match self {
            HostileKind::Scout => (30, 30),
            HostileKind::Raider => (40, 20),
            HostileKind::Brute => (25, 35),
        }
    }

    /// Uniform pick over all tiers
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl TryFrom<u8> for HostileKind {
    type Error = InvalidHostileKind;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            0 => Ok(HostileKind::Scout),
            1 => Ok(HostileKind::Raider),
            2 => Ok(HostileKind::Brute),
            other => Err(InvalidHostileKind(other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hostile {
    pub x: i32,
    pub y: i32,
    pub kind: HostileKind,
    /// Pixels per tick toward the bottom
    pub speed: i32,
    pub health: i32,
    alive: bool,
}

impl Hostile {
    pub fn new(kind: HostileKind, x: i32, y: i32, speed: i32) -> Self {
        Self {
            x,
            y,
            kind,
            speed,
            health: kind.max_health(),
            alive: true,
        }
    }

    /// Places a hostile just above the top edge with a random base speed of 1..=3
    pub fn spawn<R: Rng + ?Sized>(kind: HostileKind, center_x: i32, rng: &mut R) -> Self {
        let (width, height) = kind.size();
        let bounds = Bounds::from_center(center_x, SPAWN_CENTER_Y, width, height);
        let speed = rng.random_range(1..=3) + i32::from(kind.tier());
        Self::new(kind, bounds.x, bounds.y, speed)
    }

    /// Returns true only on the hit that destroys the hostile
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Removes the hostile without it being destroyed by fire
    pub fn deactivate(&mut self) {
        self.alive = false;
    }

    pub fn get_points(&self) -> u32 {
        self.kind.points()
    }
}

impl Entity for Hostile {
    fn bounds(&self) -> Bounds {
        let (width, height) = self.kind.size();
        Bounds::new(self.x, self.y, width, height)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn advance(&mut self, area: &PlayArea) {
        if !self.alive {
            return;
        }
        self.y += self.speed;
        if self.bounds().top() > area.height {
            self.alive = false;
        }
    }
}
