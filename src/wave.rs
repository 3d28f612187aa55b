use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{PlayArea, SPAWN_MARGIN};
use crate::entities::{Hostile, HostileKind};

/// Number of hostiles in a given wave
pub fn wave_size(wave: u32) -> usize {
    5 + wave as usize * 2
}

/// Spawns hostile batches that grow with each wave
#[derive(Debug, Clone)]
pub struct WaveDirector<R = Pcg32> {
    rng: R,
    area: PlayArea,
    wave: u32,
}

impl<R: Rng> WaveDirector<R> {
    pub fn new(area: PlayArea, rng: R) -> Self {
        Self { rng, area, wave: 0 }
    }

    /// Last wave spawned, 0 before the first
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Spawns the next wave and returns its number with the new hostiles
    pub fn next_wave(&mut self) -> (u32, Vec<Hostile>) {
        let wave = self.wave + 1;
        (wave, self.spawn_wave(wave))
    }

    /// Creates `5 + 2 * wave` hostiles of uniformly random kind, spread along the top edge.
    pub fn spawn_wave(&mut self, wave: u32) -> Vec<Hostile> {
        debug_assert!(wave >= 1, "waves are numbered from 1");
        self.wave = wave;

        let max_x = self.area.width - SPAWN_MARGIN;
        (0..wave_size(wave))
            .map(|_| {
                let kind = HostileKind::random(&mut self.rng);
                let center_x = self.rng.random_range(SPAWN_MARGIN..=max_x);
                Hostile::spawn(kind, center_x, &mut self.rng)
            })
            .collect()
    }
}
