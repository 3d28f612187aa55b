//! Hit testing between the player's projectiles, the hostiles and the player
//!
//! Resolution is order-stable: hostiles are visited in collection order and,
//! for each hostile, projectiles in collection order. A projectile is spent on
//! the first hostile it is found overlapping; a hostile soaks up every live
//! projectile overlapping it that tick, one point of damage each.

use crate::entities::{Actor, Entity, Hostile, Projectile};
use crate::game::MatchEvent;

/// What a single resolution pass changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionReport {
    pub points: u32,
    pub hostiles_destroyed: u32,
    pub projectiles_spent: u32,
    pub player_hits: u32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Runs both passes: projectiles against hostiles, then hostiles against the player.
    pub fn resolve(
        &self,
        actor: &mut Actor,
        hostiles: &mut [Hostile],
        events: &mut Vec<MatchEvent>,
    ) -> CollisionReport {
        let mut report = self.resolve_projectile_hits(&mut actor.projectiles, hostiles, events);
        report.player_hits = self.resolve_rams(actor, hostiles, events);
        report
    }

    /// Projectiles against hostiles. Returns points and kill counts.
    pub fn resolve_projectile_hits(
        &self,
        projectiles: &mut [Projectile],
        hostiles: &mut [Hostile],
        events: &mut Vec<MatchEvent>,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();

        for hostile in hostiles.iter_mut().filter(|h| h.is_alive()) {
            let hostile_bounds = hostile.bounds();
            let mut destroyed = false;

            for projectile in projectiles.iter_mut() {
                if !projectile.is_alive() || !projectile.bounds().overlaps(&hostile_bounds) {
                    continue;
                }
                projectile.consume();
                report.projectiles_spent += 1;
                if hostile.apply_damage(1) {
                    destroyed = true;
                }
            }

            if destroyed {
                let points = hostile.get_points();
                report.points += points;
                report.hostiles_destroyed += 1;
                log::debug!("{:?} destroyed at {:?} (+{points})", hostile.kind, hostile_bounds);
                events.push(MatchEvent::HostileDestroyed {
                    kind: hostile.kind,
                    bounds: hostile_bounds,
                    points,
                });
            }
        }

        report
    }

    /// Hostiles ramming the player. Every overlapping hostile is removed without
    /// score and costs one life. Returns the number of lives lost.
    pub fn resolve_rams(
        &self,
        actor: &mut Actor,
        hostiles: &mut [Hostile],
        events: &mut Vec<MatchEvent>,
    ) -> u32 {
        let actor_bounds = actor.bounds();
        let mut hits = 0;

        for hostile in hostiles.iter_mut().filter(|h| h.is_alive()) {
            if !hostile.bounds().overlaps(&actor_bounds) {
                continue;
            }
            hostile.deactivate();
            // Lives saturate at zero; the controller ends the match after this pass
            if actor.is_alive() {
                actor.take_hit();
                hits += 1;
            }
            log::debug!("player rammed by {:?}, {} lives left", hostile.kind, actor.lives);
            events.push(MatchEvent::PlayerHit {
                kind: hostile.kind,
                lives_left: actor.lives,
            });
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::HostileKind;

    fn actor() -> Actor {
        Actor::new(&GameConfig::for_play_area(800, 600))
    }

    /// Projectile centred inside the given hostile
    fn projectile_on(hostile: &Hostile) -> Projectile {
        let bounds = hostile.bounds();
        Projectile::new(bounds.center_x(), bounds.top() + bounds.height / 2, -10)
    }

    #[test]
    fn test_single_hit_destroys_scout() {
        let resolver = CollisionResolver::new();
        let mut hostiles = vec![Hostile::new(HostileKind::Scout, 100, 100, 1)];
        let mut projectiles = vec![projectile_on(&hostiles[0])];
        let mut events = Vec::new();

        let report = resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);

        assert_eq!(report.points, 10);
        assert_eq!(report.hostiles_destroyed, 1);
        assert!(!hostiles[0].is_alive());
        assert!(!projectiles[0].is_alive());
        assert!(matches!(
            events[..],
            [MatchEvent::HostileDestroyed { kind: HostileKind::Scout, points: 10, .. }]
        ));
    }

    #[test]
    fn test_brute_scores_once_after_three_hits() {
        let resolver = CollisionResolver::new();
        let mut hostiles = vec![Hostile::new(HostileKind::Brute, 100, 100, 3)];
        let mut events = Vec::new();
        let mut total = 0;

        for _ in 0..2 {
            let mut projectiles = vec![projectile_on(&hostiles[0])];
            let report =
                resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);
            total += report.points;
            assert!(hostiles[0].is_alive());
        }
        assert_eq!(total, 0);

        let mut projectiles = vec![projectile_on(&hostiles[0])];
        let report = resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);
        total += report.points;
        assert_eq!(total, 30);
        assert!(!hostiles[0].is_alive());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_several_projectiles_hit_one_hostile_same_tick() {
        let resolver = CollisionResolver::new();
        let mut hostiles = vec![Hostile::new(HostileKind::Raider, 100, 100, 2)];
        let mut projectiles = vec![projectile_on(&hostiles[0]), projectile_on(&hostiles[0])];
        let mut events = Vec::new();

        let report = resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);

        assert_eq!(report.projectiles_spent, 2);
        assert_eq!(report.points, 20);
        assert!(!hostiles[0].is_alive());
    }

    #[test]
    fn test_projectile_spent_on_first_hostile_only() {
        let resolver = CollisionResolver::new();
        // Two stacked hostiles both overlapping the same projectile
        let mut hostiles = vec![
            Hostile::new(HostileKind::Raider, 100, 100, 2),
            Hostile::new(HostileKind::Raider, 100, 100, 2),
        ];
        let mut projectiles = vec![projectile_on(&hostiles[0])];
        let mut events = Vec::new();

        let report = resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);

        assert_eq!(report.projectiles_spent, 1);
        assert_eq!(hostiles[0].health, 1);
        assert_eq!(hostiles[1].health, 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_missed_projectile_survives() {
        let resolver = CollisionResolver::new();
        let mut hostiles = vec![Hostile::new(HostileKind::Scout, 100, 100, 1)];
        let mut projectiles = vec![Projectile::new(500, 300, -10)];
        let mut events = Vec::new();

        let report = resolver.resolve_projectile_hits(&mut projectiles, &mut hostiles, &mut events);

        assert_eq!(report, CollisionReport::default());
        assert!(projectiles[0].is_alive());
        assert!(hostiles[0].is_alive());
    }

    #[test]
    fn test_ram_costs_life_without_score() {
        let resolver = CollisionResolver::new();
        let mut actor = actor();
        let mut hostiles = vec![Hostile::new(HostileKind::Brute, actor.x, actor.y, 3)];
        let mut events = Vec::new();

        let report = resolver.resolve(&mut actor, &mut hostiles, &mut events);

        assert_eq!(report.player_hits, 1);
        assert_eq!(report.points, 0);
        assert_eq!(actor.lives, 2);
        assert!(!hostiles[0].is_alive());
        assert!(matches!(events[..], [MatchEvent::PlayerHit { lives_left: 2, .. }]));
    }

    #[test]
    fn test_every_overlapping_hostile_costs_a_life() {
        let resolver = CollisionResolver::new();
        let mut actor = actor();
        let mut hostiles = vec![
            Hostile::new(HostileKind::Scout, actor.x, actor.y, 1),
            Hostile::new(HostileKind::Scout, actor.x + 10, actor.y, 1),
            Hostile::new(HostileKind::Scout, 0, 0, 1),
        ];
        let mut events = Vec::new();

        let hits = resolver.resolve_rams(&mut actor, &mut hostiles, &mut events);

        assert_eq!(hits, 2);
        assert_eq!(actor.lives, 1);
        assert!(hostiles[2].is_alive());
    }

    #[test]
    fn test_lives_saturate_at_zero() {
        let resolver = CollisionResolver::new();
        let mut actor = actor();
        let mut hostiles: Vec<Hostile> = (0..5)
            .map(|_| Hostile::new(HostileKind::Scout, actor.x, actor.y, 1))
            .collect();
        let mut events = Vec::new();

        let hits = resolver.resolve_rams(&mut actor, &mut hostiles, &mut events);

        assert_eq!(hits, 3);
        assert_eq!(actor.lives, 0);
        assert!(hostiles.iter().all(|h| !h.is_alive()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_lives_drop_by_overlap_count(overlapping in 0usize..6, far in 0usize..4) {
                let resolver = CollisionResolver::new();
                let mut actor = actor();
                let mut hostiles = Vec::new();
                for i in 0..overlapping {
                    hostiles.push(Hostile::new(HostileKind::Scout, actor.x + i as i32, actor.y, 1));
                }
                for i in 0..far {
                    hostiles.push(Hostile::new(HostileKind::Raider, 40 * i as i32, 0, 2));
                }
                let mut events = Vec::new();

                resolver.resolve_rams(&mut actor, &mut hostiles, &mut events);

                let expected = 3u32.saturating_sub(overlapping as u32);
                prop_assert_eq!(actor.lives, expected);
                prop_assert_eq!(hostiles.iter().filter(|h| h.is_alive()).count(), far);
            }
        }
    }
}
