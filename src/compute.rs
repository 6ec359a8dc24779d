/// Per-frame combat logic.
///
/// Every public function takes an immutable reference to the current state
/// and returns fresh values.  The clock (`now_ms`) and RNG are injected so
/// tests control time and randomness.

use rand::Rng;

use crate::config::Rules;
use crate::economy;
use crate::entities::{Bullet, Enemy, GameSession, Point, Screen, Unit};

// ── Units ─────────────────────────────────────────────────────────────────────

/// Fire at the first enemy (insertion order) within range, at most once per
/// cooldown window.  Returns the unit with its shot timer updated and the
/// bullet, or `None` if the unit held fire.
pub fn unit_shoot(
    unit: &Unit,
    enemies: &[Enemy],
    now_ms: u64,
    rules: &Rules,
) -> Option<(Unit, Bullet)> {
    if now_ms.saturating_sub(unit.last_shot_ms) <= rules.shot_cooldown_ms {
        return None;
    }
    let target = enemies
        .iter()
        .find(|enemy| unit.position.distance_to(enemy.position) < unit.range)?;

    let bullet = Bullet {
        position: unit.position,
        target: target.position,
        damage: unit.damage,
        speed: rules.bullet_speed,
    };
    let unit = Unit {
        last_shot_ms: now_ms,
        ..unit.clone()
    };
    Some((unit, bullet))
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyStep {
    Moved(Enemy),
    /// Path exhausted: the enemy hits the base for `damage` and is gone.
    ReachedBase { damage: i32 },
}

/// Step exactly one waypoint along the path.
pub fn advance_enemy(enemy: &Enemy) -> EnemyStep {
    match enemy.path.get(enemy.path_index) {
        Some(&waypoint) => EnemyStep::Moved(Enemy {
            position: waypoint,
            path_index: enemy.path_index + 1,
            ..enemy.clone()
        }),
        None => EnemyStep::ReachedBase {
            damage: enemy.damage,
        },
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Move toward the fixed target.  The direction is recomputed every call;
/// within one step of the target the bullet lands exactly on it.
pub fn advance_bullet(bullet: &Bullet) -> Bullet {
    let dist = bullet.position.distance_to(bullet.target);
    let position = if dist <= bullet.speed {
        bullet.target
    } else {
        let dx = (bullet.target.x - bullet.position.x) / dist;
        let dy = (bullet.target.y - bullet.position.y) / dist;
        Point::new(
            bullet.position.x + dx * bullet.speed,
            bullet.position.y + dy * bullet.speed,
        )
    };
    Bullet {
        position,
        ..bullet.clone()
    }
}

pub fn has_arrived(bullet: &Bullet) -> bool {
    bullet.position == bullet.target
}

/// Index of the first enemy within the hit radius, if any.
pub fn bullet_hit(bullet: &Bullet, enemies: &[Enemy], hit_radius: f32) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| bullet.position.distance_to(enemy.position) < hit_radius)
}

// ── Tick phases ───────────────────────────────────────────────────────────────

/// Phase 2: every unit gets one chance to fire.
pub fn units_fire(state: &GameSession, now_ms: u64) -> GameSession {
    let mut bullets = state.bullets.clone();
    let units: Vec<Unit> = state
        .units
        .iter()
        .map(|unit| match unit_shoot(unit, &state.enemies, now_ms, &state.rules) {
            Some((fired, bullet)) => {
                bullets.push(bullet);
                fired
            }
            None => unit.clone(),
        })
        .collect();

    GameSession {
        units,
        bullets,
        ..state.clone()
    }
}

/// Phase 3: enemies walk; leakers hit the base, the dead pay out.
///
/// Builds the next live set from the current one rather than removing in
/// place, so every enemy is visited and removed exactly once.
pub fn advance_enemies(state: &GameSession) -> GameSession {
    let mut next = GameSession {
        enemies: Vec::with_capacity(state.enemies.len()),
        ..state.clone()
    };

    for enemy in &state.enemies {
        match advance_enemy(enemy) {
            EnemyStep::ReachedBase { damage } => {
                tracing::debug!(enemy = enemy.kind.name(), damage, "enemy reached the base");
                next.base_health -= damage;
                next.leaks += 1;
            }
            EnemyStep::Moved(moved) if moved.is_dead() => {
                next = economy::award_kill(&next, moved.kind);
            }
            EnemyStep::Moved(moved) => next.enemies.push(moved),
        }
    }
    next
}

/// Phase 4: bullets fly; each one hits at most one enemy and is consumed.
/// A bullet that reaches its target point without a hit is discarded.
pub fn advance_bullets(state: &GameSession) -> GameSession {
    let mut enemies = state.enemies.clone();
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|bullet| {
            let moved = advance_bullet(bullet);
            if let Some(i) = bullet_hit(&moved, &enemies, state.rules.hit_radius) {
                enemies[i].health -= moved.damage as i32;
                None
            } else if has_arrived(&moved) {
                None
            } else {
                Some(moved)
            }
        })
        .collect();

    GameSession {
        enemies,
        bullets,
        ..state.clone()
    }
}

/// Phase 5: losing takes precedence over winning.
pub fn evaluate_outcome(state: &GameSession) -> Screen {
    if state.base_health <= 0 {
        return Screen::Lost;
    }
    match state.wave_cap() {
        Some(cap) if state.wave >= cap && state.enemies.is_empty() => Screen::Won,
        _ => state.screen,
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Order is fixed: spawn, units fire,
/// enemies move, bullets move and collide, then the win/lose check.
pub fn tick(state: &GameSession, now_ms: u64, rng: &mut impl Rng) -> GameSession {
    let state = if economy::can_spawn_wave(state) {
        economy::spawn_wave(state, rng)
    } else {
        state.clone()
    };

    let state = units_fire(&state, now_ms);
    let state = advance_enemies(&state);
    let state = advance_bullets(&state);

    let screen = evaluate_outcome(&state);
    if screen != state.screen {
        match screen {
            Screen::Lost => tracing::info!(wave = state.wave, kills = state.kills, "base destroyed"),
            Screen::Won => tracing::info!(wave = state.wave, gold = state.gold, "all waves cleared"),
            _ => {}
        }
    }

    GameSession { screen, ..state }
}
