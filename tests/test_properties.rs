use snake_tower_defense::compute::{tick, unit_shoot};
use snake_tower_defense::config::Rules;
use snake_tower_defense::economy::{summon_unit, upgrade_unit};
use snake_tower_defense::entities::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn armed_session(mode: Mode, unit_spots: &[(f32, f32)]) -> GameSession {
    let mut s = GameSession {
        mode: Some(mode),
        screen: Screen::Playing,
        ..GameSession::new(Rules::default())
    };
    for (i, &(x, y)) in unit_spots.iter().enumerate() {
        let kind = UnitKind::ALL[i % UnitKind::ALL.len()];
        s.units.push(Unit::summon(kind, Point::new(x, y)));
    }
    s
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn base_health_never_rises_during_play(
        seed in any::<u64>(),
        spots in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 0..6),
        frame_ms in 1u64..40,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = armed_session(Mode::Endless, &spots);
        let mut now = 0;
        for _ in 0..200 {
            now += frame_ms;
            let next = tick(&s, now, &mut rng);
            prop_assert!(next.base_health <= s.base_health);
            prop_assert!(next.wave >= s.wave);
            s = next;
        }
    }

    #[test]
    fn shots_are_spaced_and_in_range(
        enemy_spots in prop::collection::vec((0.0f32..400.0, 0.0f32..400.0), 1..8),
        steps in prop::collection::vec(1u64..700, 1..60),
    ) {
        let rules = Rules::default();
        let enemies: Vec<Enemy> = enemy_spots
            .iter()
            .map(|&(x, y)| Enemy { position: Point::new(x, y), ..Enemy::spawn(EnemyKind::Diddy, x, &rules) })
            .collect();
        let mut unit = Unit::summon(UnitKind::WaterSnake, Point::new(200.0, 200.0));
        let mut now = 0;
        let mut last_fire: Option<u64> = None;

        for step in steps {
            now += step;
            if let Some((fired, bullet)) = unit_shoot(&unit, &enemies, now, &rules) {
                if let Some(prev) = last_fire {
                    prop_assert!(now - prev > rules.shot_cooldown_ms);
                }
                prop_assert!(unit.position.distance_to(bullet.target) < unit.range);
                last_fire = Some(now);
                unit = fired;
            }
        }
    }

    #[test]
    fn purchases_never_overdraw(
        start_gold in 0u32..400,
        ops in prop::collection::vec((any::<bool>(), 0usize..4), 0..30),
    ) {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = armed_session(Mode::Easy, &[]);
        s.gold = start_gold;

        for (summon, idx) in ops {
            let before = s.gold;
            let result = if summon {
                summon_unit(&s, UnitKind::ALL[idx % 3], &mut rng).map(|n| (n, UnitKind::ALL[idx % 3].cost()))
            } else {
                upgrade_unit(&s, idx).map(|n| (n, s.rules.upgrade_cost))
            };
            match result {
                Ok((next, cost)) => {
                    prop_assert!(cost <= before);
                    prop_assert_eq!(next.gold, before - cost);
                    s = next;
                }
                Err(_) => {
                    prop_assert_eq!(s.gold, before);
                }
            }
        }
    }
}
