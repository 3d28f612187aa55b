/// Integration tests for game logic
///
/// These tests drive whole matches through the public API and check the
/// interactions between the player, hostiles, collisions and wave spawning.
use std::time::Duration;

use galactic_defender::{
    Entity, GameConfig, HostileKind, MatchController, MatchEvent, MatchState, TickInput,
    WaveDirector, wave_size,
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Random source that always yields zero: every hostile is a Scout centred at
/// the left spawn margin with the slowest speed.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

const FRAME: Duration = Duration::from_millis(16);

fn config() -> GameConfig {
    GameConfig::for_play_area(400, 600)
}

#[test]
fn test_fresh_match_without_ticks() {
    let game = MatchController::new(config(), 7).unwrap();
    assert_eq!(game.score(), 0);
    assert_eq!(game.wave(), 1);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.state(), MatchState::Running);
    assert_eq!(game.hostiles().len(), 7);
    assert!(game.hostiles().iter().all(|h| h.is_alive()));
}

#[test]
fn test_zero_rng_spawns_slow_scouts() {
    let mut director = WaveDirector::new(config().play_area, ZeroRng);
    let hostiles = director.spawn_wave(1);
    assert_eq!(hostiles.len(), 7);
    for hostile in hostiles {
        assert_eq!(hostile.kind, HostileKind::Scout);
        assert_eq!(hostile.speed, 1);
        assert_eq!(hostile.bounds().center_x(), 50);
    }
}

#[test]
fn test_wave_sizes_grow_by_two() {
    let mut director = WaveDirector::new(config().play_area, Pcg32::seed_from_u64(3));
    for wave in 1..=10 {
        assert_eq!(director.spawn_wave(wave).len(), wave_size(wave));
        assert_eq!(wave_size(wave), 5 + 2 * wave as usize);
    }
}

#[test]
fn test_same_seed_same_match() {
    let mut a = MatchController::new(config(), 2024).unwrap();
    let mut b = MatchController::new(config(), 2024).unwrap();
    for frame in 0..300u32 {
        let input = TickInput {
            move_left: frame % 3 == 0,
            move_right: frame % 5 == 0,
            fire: true,
            now: FRAME * frame,
        };
        assert_eq!(a.tick(&input), b.tick(&input));
    }
    assert_eq!(
        a.drawables().collect::<Vec<_>>(),
        b.drawables().collect::<Vec<_>>()
    );
}

#[test]
fn test_score_never_decreases() {
    let mut game = MatchController::new(config(), 11).unwrap();
    let mut last_score = 0;
    for frame in 0..3000u32 {
        let report = game.tick(&TickInput {
            move_left: (frame / 40) % 2 == 0,
            move_right: (frame / 40) % 2 == 1,
            fire: true,
            now: FRAME * frame,
        });
        assert!(report.status.score >= last_score);
        last_score = report.status.score;
        if report.status.state == MatchState::GameOver {
            assert_eq!(report.status.lives, 0);
            break;
        }
    }
}

#[test]
fn test_pause_freezes_simulation() {
    let mut game = MatchController::new(config(), 5).unwrap();
    game.tick(&TickInput::default());
    let before: Vec<_> = game.drawables().collect();

    game.pause();
    for frame in 0..50u32 {
        let report = game.tick(&TickInput {
            fire: true,
            move_left: true,
            now: FRAME * frame + Duration::from_secs(1),
            ..Default::default()
        });
        assert_eq!(report.status.state, MatchState::Paused);
        assert!(report.events.is_empty());
    }
    assert_eq!(game.drawables().collect::<Vec<_>>(), before);

    game.resume();
    game.tick(&TickInput::default());
    assert_ne!(game.drawables().collect::<Vec<_>>(), before);
}

#[test]
fn test_clearing_wave_one_spawns_wave_two() {
    let mut game = MatchController::with_rng(config(), ZeroRng).unwrap();
    assert_eq!(game.hostiles().len(), 7);
    assert!(game.hostiles().iter().all(|h| h.kind == HostileKind::Scout));

    let target_x = game.hostiles()[0].bounds().center_x();
    let mut frame = 0u32;
    let mut destroyed = 0;
    let mut shots = 0;

    while game.wave() == 1 {
        assert!(frame < 5000, "wave 1 was never cleared");
        let remaining = game.hostiles().len();
        assert!(remaining > 0, "wave 1 emptied without wave 2 spawning");

        let actor_x = game.actor().bounds().center_x();
        let report = game.tick(&TickInput {
            move_left: actor_x > target_x + 4,
            move_right: actor_x < target_x - 4,
            fire: true,
            now: FRAME * frame,
        });
        frame += 1;

        for event in &report.events {
            match event {
                MatchEvent::HostileDestroyed { kind, points, .. } => {
                    assert_eq!(*kind, HostileKind::Scout);
                    assert_eq!(*points, 10);
                    destroyed += 1;
                }
                MatchEvent::Shot => shots += 1,
                MatchEvent::PlayerHit { .. } | MatchEvent::GameOver { .. } => {
                    panic!("player was hit while clearing wave 1")
                }
                MatchEvent::WaveStarted { wave } => assert_eq!(*wave, 2),
            }
        }

        if game.wave() == 1 {
            // a partly cleared wave never triggers the next one
            assert_eq!(game.hostiles().len(), 7 - destroyed);
        }
    }

    assert_eq!(destroyed, 7);
    assert!(shots >= 7);
    assert_eq!(game.wave(), 2);
    assert_eq!(game.score(), 70);
    assert_eq!(game.kills(), 7);
    assert_eq!(game.hits(), 7);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.hostiles().len(), 9);
    assert!(game.hostiles().iter().all(|h| h.bounds().bottom() < 0));
}

#[test]
fn test_running_into_hostiles_ends_match() {
    let mut game = MatchController::with_rng(config(), ZeroRng).unwrap();
    let target_x = game.hostiles()[0].bounds().center_x();
    let mut lives_seen = vec![game.lives()];

    for frame in 0..5000u32 {
        let actor_x = game.actor().bounds().center_x();
        let report = game.tick(&TickInput {
            move_left: actor_x > target_x + 4,
            move_right: actor_x < target_x - 4,
            fire: false,
            now: FRAME * frame,
        });
        if report.status.lives != *lives_seen.last().unwrap() {
            lives_seen.push(report.status.lives);
        }
        if report.status.state == MatchState::GameOver {
            break;
        }
    }

    assert_eq!(game.state(), MatchState::GameOver);
    assert_eq!(game.lives(), 0);
    assert_eq!(game.score(), 0);
    // seven stacked scouts arrive together, so all three lives go at once
    assert_eq!(lives_seen, vec![3, 0]);
    assert_eq!(game.wave(), 1);
}
