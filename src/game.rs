//! The match state machine
//!
//! One [`MatchController::tick`] is one frame of simulation. The presentation
//! layer owns pacing, input polling and drawing; it hands the controller a
//! [`TickInput`] and reads back a [`TickReport`].

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::collision::CollisionResolver;
use crate::config::{GameConfig, PlayArea};
use crate::entities::{Actor, Bounds, Direction, Entity, Hostile, HostileKind};
use crate::error::ConfigError;
use crate::wave::WaveDirector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Running,
    Paused,
    GameOver,
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Time elapsed since the match started
    pub now: Duration,
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    Shot,
    HostileDestroyed {
        kind: HostileKind,
        bounds: Bounds,
        points: u32,
    },
    PlayerHit {
        kind: HostileKind,
        lives_left: u32,
    },
    WaveStarted {
        wave: u32,
    },
    GameOver {
        score: u32,
    },
}

/// HUD values after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStatus {
    pub score: u32,
    pub lives: u32,
    pub wave: u32,
    pub state: MatchState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<MatchEvent>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Player,
    Projectile,
    Hostile(HostileKind),
}

/// Anything the presentation layer has to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable {
    pub kind: DrawKind,
    pub bounds: Bounds,
}

pub struct MatchController<R = Pcg32> {
    config: GameConfig,
    state: MatchState,
    actor: Actor,
    hostiles: Vec<Hostile>,
    director: WaveDirector<R>,
    resolver: CollisionResolver,
    score: u32,
    /// Hostiles shot down this match
    kills: u32,
    /// Projectiles that struck a hostile this match
    hits: u32,
    ticks: u64,
}

impl MatchController<Pcg32> {
    /// Builds a match whose hostile waves are drawn from the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchController<R> {
    /// Builds a match with an explicit random source and spawns wave 1.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let actor = Actor::new(&config);
        let mut director = WaveDirector::new(config.play_area, rng);
        let (wave, hostiles) = director.next_wave();
        log::info!(
            "match started: {}x{} play area, {} lives, wave {} with {} hostiles",
            config.play_area.width,
            config.play_area.height,
            actor.lives,
            wave,
            hostiles.len()
        );

        Ok(Self {
            config,
            state: MatchState::Running,
            actor,
            hostiles,
            director,
            resolver: CollisionResolver::new(),
            score: 0,
            kills: 0,
            hits: 0,
            ticks: 0,
        })
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wave(&self) -> u32 {
        self.director.wave()
    }

    /// Hostiles destroyed by projectiles so far
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Projectiles spent on hostiles so far
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn lives(&self) -> u32 {
        self.actor.lives
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn play_area(&self) -> PlayArea {
        self.config.play_area
    }

    /// Number of ticks simulated so far (paused ticks excluded)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus {
            score: self.score,
            lives: self.actor.lives,
            wave: self.wave(),
            state: self.state,
        }
    }

    pub fn pause(&mut self) {
        if self.state == MatchState::Running {
            self.state = MatchState::Paused;
            log::debug!("match paused at tick {}", self.ticks);
        }
    }

    pub fn resume(&mut self) {
        if self.state == MatchState::Paused {
            self.state = MatchState::Running;
            log::debug!("match resumed at tick {}", self.ticks);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            MatchState::Running => self.pause(),
            MatchState::Paused => self.resume(),
            MatchState::GameOver => {}
        }
    }

    /// Everything on screen: player first, then projectiles, then hostiles.
    pub fn drawables(&self) -> impl Iterator<Item = Drawable> + '_ {
        let player = std::iter::once(Drawable {
            kind: DrawKind::Player,
            bounds: self.actor.bounds(),
        });
        let projectiles = self.actor.projectiles.iter().map(|p| Drawable {
            kind: DrawKind::Projectile,
            bounds: p.bounds(),
        });
        let hostiles = self.hostiles.iter().map(|h| Drawable {
            kind: DrawKind::Hostile(h.kind),
            bounds: h.bounds(),
        });
        player.chain(projectiles).chain(hostiles)
    }

    /// Advances the match by one frame. Does nothing unless the match is running.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        let mut events = Vec::new();
        if self.state != MatchState::Running {
            return self.report(events);
        }
        self.ticks += 1;
        let area = self.config.play_area;

        // 1. input
        if input.move_left {
            self.actor.shift(Direction::Left, &area);
        }
        if input.move_right {
            self.actor.shift(Direction::Right, &area);
        }
        if input.fire && self.actor.shoot(input.now) {
            events.push(MatchEvent::Shot);
        }

        // 2. movement
        self.actor.advance_projectiles(&area);
        for hostile in &mut self.hostiles {
            hostile.advance(&area);
        }
        self.prune();

        // 3. collisions
        let report = self
            .resolver
            .resolve(&mut self.actor, &mut self.hostiles, &mut events);
        self.score += report.points;
        self.kills += report.hostiles_destroyed;
        self.hits += report.projectiles_spent;
        self.prune();

        // 4. terminal check
        if !self.actor.is_alive() {
            self.state = MatchState::GameOver;
            log::info!(
                "game over on wave {} after {} ticks, final score {} ({} kills, {} hits)",
                self.wave(),
                self.ticks,
                self.score,
                self.kills,
                self.hits
            );
            events.push(MatchEvent::GameOver { score: self.score });
            return self.report(events);
        }

        // 5. wave replenishment
        if self.hostiles.is_empty() {
            let (wave, hostiles) = self.director.next_wave();
            self.hostiles = hostiles;
            log::info!(
                "wave {} started with {} hostiles (score {})",
                wave,
                self.hostiles.len(),
                self.score
            );
            events.push(MatchEvent::WaveStarted { wave });
        }

        // 6. report
        self.report(events)
    }

    fn prune(&mut self) {
        self.actor.prune_projectiles();
        self.hostiles.retain(|h| h.is_alive());
    }

    fn report(&self, events: Vec<MatchEvent>) -> TickReport {
        TickReport {
            events,
            status: self.status(),
        }
    }
}
