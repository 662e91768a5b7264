//! Per-frame simulation tick
//!
//! Advances every active entity by one frame's worth of physics. Removal is
//! a mark-and-compact pass over each collection, never index juggling
//! during iteration.

use super::state::ShowState;
use crate::consts::GRAVITY;

/// Advance the show by one tick.
///
/// Rockets climb first; any that crossed their target altitude detonate at
/// their moved position and leave the live set. Sparks then drift, fall,
/// and fade, dying once fully transparent. Sparks born this tick take
/// their first physics step immediately.
pub fn tick(state: &mut ShowState) {
    state.time_ticks += 1;

    // Climb rockets and collect detonations; `explode` needs the whole
    // engine mutably, so bursts happen after the compact pass
    let mut detonations = Vec::new();
    state.rockets.retain_mut(|rocket| {
        rocket.pos.y -= rocket.speed;
        if rocket.pos.y <= rocket.target_y {
            detonations.push((rocket.pos.x, rocket.pos.y, rocket.color));
            false
        } else {
            true
        }
    });

    for (x, y, color) in detonations {
        state.explode(x, y, color);
    }

    // Drift, fall, fade
    state.sparks.retain_mut(|spark| {
        spark.pos += spark.vel;
        spark.vel.y += GRAVITY;
        spark.alpha -= spark.decay;
        spark.alpha > 0.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Rocket, Spark};
    use glam::Vec2;
    use proptest::prelude::*;

    fn empty_state(seed: u64) -> ShowState {
        ShowState::new(800.0, 600.0, 6, seed)
    }

    #[test]
    fn test_rocket_climbs_by_its_speed() {
        let mut state = empty_state(1);
        state.rockets.push(Rocket {
            pos: Vec2::new(100.0, 600.0),
            target_y: 50.0,
            speed: 9.0,
            color: 2,
        });

        tick(&mut state);
        assert_eq!(state.rockets[0].pos.y, 591.0);
        tick(&mut state);
        assert_eq!(state.rockets[0].pos.y, 582.0);
        assert!(state.sparks.is_empty());
    }

    #[test]
    fn test_rocket_detonates_after_moving() {
        // The altitude check happens after the climb, so a rocket at y=100
        // with target 105 bursts at y=90, not 105
        let mut state = empty_state(2);
        state.rockets.push(Rocket {
            pos: Vec2::new(320.0, 100.0),
            target_y: 105.0,
            speed: 10.0,
            color: 3,
        });

        tick(&mut state);

        assert!(state.rockets.is_empty());
        assert!(state.sparks.len() >= 80 && state.sparks.len() < 120);
        for spark in &state.sparks {
            // Born at the burst point, then stepped once in the same tick
            let birth_vel = spark.vel - Vec2::new(0.0, GRAVITY);
            assert!((spark.pos - (Vec2::new(320.0, 90.0) + birth_vel)).length() < 1e-4);
            assert_eq!(spark.color, 3);
            assert!(spark.alpha < 1.0);
        }
    }

    #[test]
    fn test_spark_single_step() {
        let mut state = empty_state(3);
        state.sparks.push(Spark {
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::new(1.5, -2.0),
            color: 0,
            alpha: 1.0,
            decay: 0.02,
            size: 3.0,
        });

        tick(&mut state);

        let spark = &state.sparks[0];
        // Position moves by the pre-gravity velocity
        assert_eq!(spark.pos, Vec2::new(11.5, 18.0));
        assert_eq!(spark.vel, Vec2::new(1.5, -2.0 + GRAVITY));
        assert!((spark.alpha - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_spark_dies_at_zero_alpha() {
        let mut state = empty_state(4);
        state.sparks.push(Spark {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: 0,
            alpha: 0.02,
            decay: 0.02,
            size: 2.0,
        });

        tick(&mut state);
        assert!(state.sparks.is_empty(), "alpha hitting exactly zero is death");
    }

    #[test]
    fn test_tick_applies_exact_decay_to_every_spark() {
        let mut state = empty_state(5);
        state.explode(400.0, 300.0, 1);
        for _ in 0..30 {
            tick(&mut state);
        }

        let before = state.sparks.clone();
        tick(&mut state);

        let expected: Vec<Spark> = before
            .iter()
            .map(|s| Spark {
                pos: s.pos + s.vel,
                vel: Vec2::new(s.vel.x, s.vel.y + GRAVITY),
                alpha: s.alpha - s.decay,
                ..*s
            })
            .filter(|s| s.alpha > 0.0)
            .collect();

        assert_eq!(state.sparks, expected);
    }

    #[test]
    fn test_simultaneous_detonations_each_burst_once() {
        let mut state = empty_state(6);
        for x in [100.0, 200.0, 300.0] {
            state.rockets.push(Rocket {
                pos: Vec2::new(x, 60.0),
                target_y: 100.0,
                speed: 8.0,
                color: 0,
            });
        }

        tick(&mut state);

        assert!(state.rockets.is_empty());
        assert!(state.sparks.len() >= 3 * 80 && state.sparks.len() < 3 * 120);
    }

    proptest! {
        #[test]
        fn prop_show_burns_out(seed in any::<u64>()) {
            let mut state = empty_state(seed);
            state.spawn_rocket();

            // Worst case: ~69 ticks of climb plus ~67 of fade
            for _ in 0..400 {
                tick(&mut state);
                for spark in &state.sparks {
                    prop_assert!(spark.alpha > 0.0);
                    prop_assert!(spark.alpha <= 1.0);
                }
            }
            prop_assert!(state.rockets.is_empty());
            prop_assert!(state.sparks.is_empty());
        }

        #[test]
        fn prop_rocket_y_monotonically_decreases_until_burst(seed in any::<u64>()) {
            let mut state = empty_state(seed);
            state.spawn_rocket();
            let mut last_y = state.rockets[0].pos.y;

            while let Some(rocket) = state.rockets.first() {
                let speed = rocket.speed;
                let y = rocket.pos.y;
                prop_assert!(y <= last_y);
                last_y = y - speed; // where the next tick must land
                tick(&mut state);
                if let Some(rocket) = state.rockets.first() {
                    prop_assert_eq!(rocket.pos.y, last_y);
                }
            }
        }
    }
}
