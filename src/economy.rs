/// Wave counter and gold.
///
/// The wave state is implicit: `(wave, mode cap)`.  A new wave only starts
/// once the previous batch is fully cleared and the cap is not reached.

use rand::Rng;

use crate::entities::{Enemy, EnemyKind, GameSession, Point, Unit, UnitKind};
use crate::error::EconomyError;

/// Summoned units land inside this box (inclusive), away from the edges.
const SUMMON_X: (f32, f32) = (100.0, 700.0);
const SUMMON_Y: (f32, f32) = (100.0, 500.0);

pub fn can_spawn_wave(state: &GameSession) -> bool {
    state.enemies.is_empty() && state.wave_cap().map_or(true, |cap| state.wave < cap)
}

pub fn enemies_for_wave(state: &GameSession, wave: u32) -> u32 {
    state.rules.base_enemies_per_wave + wave
}

/// Start the next wave: bump the counter, spawn `base + wave` enemies of
/// random kinds along the top edge and grant the wave bonus.
pub fn spawn_wave(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let wave = state.wave + 1;
    let count = enemies_for_wave(state, wave);
    let width = state.rules.world_width as f32;

    let mut enemies = state.enemies.clone();
    for _ in 0..count {
        let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
        let x = rng.gen_range(0.0..=width).round();
        enemies.push(Enemy::spawn(kind, x, &state.rules));
    }

    tracing::info!(wave, enemies = count, gold = state.gold + state.rules.wave_bonus, "wave spawned");

    GameSession {
        wave,
        enemies,
        gold: state.gold + state.rules.wave_bonus,
        ..state.clone()
    }
}

pub fn award_kill(state: &GameSession, kind: EnemyKind) -> GameSession {
    tracing::debug!(enemy = kind.name(), reward = state.rules.kill_reward, "enemy killed");
    GameSession {
        gold: state.gold + state.rules.kill_reward,
        kills: state.kills + 1,
        ..state.clone()
    }
}

/// Take `cost` gold, refusing rather than going negative.
pub fn spend(state: &GameSession, cost: u32) -> Result<u32, EconomyError> {
    state
        .gold
        .checked_sub(cost)
        .ok_or(EconomyError::InsufficientFunds { cost, available: state.gold })
}

/// Buy a unit and drop it at a random spot on the field.
pub fn summon_unit(
    state: &GameSession,
    kind: UnitKind,
    rng: &mut impl Rng,
) -> Result<GameSession, EconomyError> {
    let gold = spend(state, kind.cost())?;
    let position = Point::new(
        rng.gen_range(SUMMON_X.0..=SUMMON_X.1).round(),
        rng.gen_range(SUMMON_Y.0..=SUMMON_Y.1).round(),
    );
    Ok(place_unit(state, kind, position, gold))
}

/// Buy a unit at a fixed position.
pub fn summon_unit_at(
    state: &GameSession,
    kind: UnitKind,
    position: Point,
) -> Result<GameSession, EconomyError> {
    let gold = spend(state, kind.cost())?;
    Ok(place_unit(state, kind, position, gold))
}

fn place_unit(state: &GameSession, kind: UnitKind, position: Point, gold: u32) -> GameSession {
    tracing::debug!(unit = kind.name(), x = position.x, y = position.y, gold, "unit summoned");
    let mut units = state.units.clone();
    units.push(Unit::summon(kind, position));
    GameSession {
        units,
        gold,
        notice: None,
        ..state.clone()
    }
}

/// Flat-cost upgrade of the unit at `index`: more damage, one more level.
pub fn upgrade_unit(state: &GameSession, index: usize) -> Result<GameSession, EconomyError> {
    if index >= state.units.len() {
        return Err(EconomyError::NoSuchUnit { index });
    }
    let gold = spend(state, state.rules.upgrade_cost)?;

    let mut units = state.units.clone();
    let unit = &mut units[index];
    unit.damage += state.rules.upgrade_damage;
    unit.upgrade_level += 1;
    tracing::debug!(
        unit = unit.kind.name(),
        level = unit.upgrade_level,
        damage = unit.damage,
        gold,
        "unit upgraded"
    );

    Ok(GameSession {
        units,
        gold,
        notice: None,
        ..state.clone()
    })
}
