use snake_tower_defense::config::Rules;
use snake_tower_defense::economy::*;
use snake_tower_defense::entities::*;
use snake_tower_defense::error::EconomyError;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameSession {
    GameSession {
        mode: Some(Mode::Easy),
        screen: Screen::Playing,
        ..GameSession::new(Rules::default())
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

// ── waves ─────────────────────────────────────────────────────────────────────

#[test]
fn wave_spawns_only_when_clear_and_under_cap() {
    let mut s = make_state();
    assert!(can_spawn_wave(&s));

    s.enemies.push(Enemy::spawn(EnemyKind::Diddy, 0.0, &s.rules));
    assert!(!can_spawn_wave(&s));

    s.enemies.clear();
    s.wave = 10;
    assert!(!can_spawn_wave(&s));

    s.mode = Some(Mode::Endless);
    assert!(can_spawn_wave(&s));
}

#[test]
fn spawn_wave_grows_with_wave_number() {
    let mut s = make_state();
    s.wave = 4;
    let s2 = spawn_wave(&s, &mut seeded_rng());
    assert_eq!(s2.wave, 5);
    assert_eq!(s2.enemies.len(), 10);
    assert_eq!(s2.gold, s.gold + 10);
    assert!(s2.enemies.iter().all(|e| e.position.y == 0.0 && e.path_index == 0));
}

#[test]
fn spawn_wave_is_deterministic_for_a_seed() {
    let s = make_state();
    let a = spawn_wave(&s, &mut seeded_rng());
    let b = spawn_wave(&s, &mut seeded_rng());
    assert_eq!(a.enemies, b.enemies);
}

// ── summon ────────────────────────────────────────────────────────────────────

#[test]
fn summon_fire_snake_then_run_out_of_gold() {
    let s = make_state();
    let mut rng = seeded_rng();

    let s2 = summon_unit(&s, UnitKind::FireSnake, &mut rng).unwrap();
    assert_eq!(s2.gold, 50);
    assert_eq!(s2.units.len(), 1);
    let placed = s2.units[0].position;
    assert!((100.0..=700.0).contains(&placed.x));
    assert!((100.0..=500.0).contains(&placed.y));

    let mut poor = s2.clone();
    poor.gold = 40;
    let err = summon_unit(&poor, UnitKind::FireSnake, &mut rng).unwrap_err();
    assert_eq!(err, EconomyError::InsufficientFunds { cost: 50, available: 40 });
    assert_eq!(poor.gold, 40);
    assert_eq!(poor.units.len(), 1);
}

#[test]
fn summon_at_exact_cost_leaves_zero() {
    let mut s = make_state();
    s.gold = 70;
    let s2 = summon_unit_at(&s, UnitKind::DirtSnake, Point::new(300.0, 300.0)).unwrap();
    assert_eq!(s2.gold, 0);
    assert_eq!(s2.units[0].kind, UnitKind::DirtSnake);
    assert_eq!(s2.units[0].position, Point::new(300.0, 300.0));
}

#[test]
fn successful_purchase_clears_notice() {
    let mut s = make_state();
    s.notice = Some("Not enough gold".into());
    let s2 = summon_unit_at(&s, UnitKind::FireSnake, Point::new(1.0, 1.0)).unwrap();
    assert_eq!(s2.notice, None);
}

// ── upgrade ───────────────────────────────────────────────────────────────────

#[test]
fn upgrade_adds_damage_and_level() {
    let s = summon_unit_at(&make_state(), UnitKind::WaterSnake, Point::new(1.0, 1.0)).unwrap();
    let mut s = s;
    s.gold = 120;
    let s2 = upgrade_unit(&s, 0).unwrap();
    assert_eq!(s2.units[0].damage, 20);
    assert_eq!(s2.units[0].upgrade_level, 2);
    assert_eq!(s2.units[0].range, 120.0);
    assert_eq!(s2.gold, 70);
}

#[test]
fn upgrade_rejected_without_gold() {
    let mut s = summon_unit_at(&make_state(), UnitKind::FireSnake, Point::new(1.0, 1.0)).unwrap();
    s.gold = 49;
    assert_eq!(
        upgrade_unit(&s, 0).unwrap_err(),
        EconomyError::InsufficientFunds { cost: 50, available: 49 }
    );
}

#[test]
fn upgrade_missing_slot() {
    let s = make_state();
    assert_eq!(upgrade_unit(&s, 2).unwrap_err(), EconomyError::NoSuchUnit { index: 2 });
}

#[test]
fn kill_reward() {
    let s = make_state();
    let s2 = award_kill(&s, EnemyKind::Boss);
    assert_eq!(s2.gold, 105);
    assert_eq!(s2.kills, 1);
}
