/// All game entity types and their stat tables.  No per-tick logic here;
/// see `compute` and `economy`.

use std::fmt;
use std::str::FromStr;

use crate::config::Rules;
use crate::error::ParseModeError;

// ── Geometry & colour ─────────────────────────────────────────────────────────

/// A point in world coordinates (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const RED: Rgb = Rgb(255, 0, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const BROWN: Rgb = Rgb(139, 69, 19);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const PINK: Rgb = Rgb(255, 192, 203);

// ── Unit kinds ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    FireSnake,
    WaterSnake,
    DirtSnake,
}

impl UnitKind {
    /// Shop order.
    pub const ALL: [UnitKind; 3] = [UnitKind::FireSnake, UnitKind::WaterSnake, UnitKind::DirtSnake];

    pub fn name(self) -> &'static str {
        match self {
            UnitKind::FireSnake => "Fire Snake",
            UnitKind::WaterSnake => "Water Snake",
            UnitKind::DirtSnake => "Dirt Snake",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            UnitKind::FireSnake => RED,
            UnitKind::WaterSnake => BLUE,
            UnitKind::DirtSnake => BROWN,
        }
    }

    pub fn base_damage(self) -> u32 {
        match self {
            UnitKind::FireSnake => 10,
            UnitKind::WaterSnake => 15,
            UnitKind::DirtSnake => 20,
        }
    }

    pub fn range(self) -> f32 {
        match self {
            UnitKind::FireSnake => 100.0,
            UnitKind::WaterSnake => 120.0,
            UnitKind::DirtSnake => 80.0,
        }
    }

    pub fn cost(self) -> u32 {
        match self {
            UnitKind::FireSnake => 50,
            UnitKind::WaterSnake => 60,
            UnitKind::DirtSnake => 70,
        }
    }
}

// ── Enemy kinds ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Diddy,
    Skibidi,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Diddy, EnemyKind::Skibidi, EnemyKind::Boss];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Diddy => "Diddy",
            EnemyKind::Skibidi => "Skibidi",
            EnemyKind::Boss => "BOSS",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            EnemyKind::Diddy => WHITE,
            EnemyKind::Skibidi => GREEN,
            EnemyKind::Boss => PINK,
        }
    }

    pub fn max_health(self) -> i32 {
        match self {
            EnemyKind::Diddy => 50,
            EnemyKind::Skibidi => 100,
            EnemyKind::Boss => 200,
        }
    }

    pub fn speed(self) -> u32 {
        match self {
            EnemyKind::Diddy => 2,
            EnemyKind::Skibidi | EnemyKind::Boss => 1,
        }
    }

    /// Damage dealt to the base on reaching the end of the path.
    pub fn contact_damage(self) -> i32 {
        match self {
            EnemyKind::Diddy => 10,
            EnemyKind::Skibidi => 20,
            EnemyKind::Boss => 50,
        }
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Easy,
    Hard,
    Extreme,
    Endless,
}

impl Mode {
    /// Menu order: key `1` selects `ALL[0]`.
    pub const ALL: [Mode; 4] = [Mode::Easy, Mode::Hard, Mode::Extreme, Mode::Endless];

    /// Total number of waves, or `None` for unbounded play.
    pub fn wave_cap(self) -> Option<u32> {
        match self {
            Mode::Easy => Some(10),
            Mode::Hard => Some(25),
            Mode::Extreme => Some(50),
            Mode::Endless => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Easy => "Easy",
            Mode::Hard => "Hard",
            Mode::Extreme => "Extreme",
            Mode::Endless => "Endless",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    /// Modal sub-screens: the simulation is paused while either is open.
    Upgrade,
    Shop,
    Won,
    Lost,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub position: Point,
    pub kind: UnitKind,
    pub color: Rgb,
    pub damage: u32,
    pub range: f32,
    /// Clock reading (ms) of the last shot; 0 means never fired.
    pub last_shot_ms: u64,
    pub upgrade_level: u32,
}

impl Unit {
    pub fn summon(kind: UnitKind, position: Point) -> Self {
        Unit {
            position,
            kind,
            color: kind.color(),
            damage: kind.base_damage(),
            range: kind.range(),
            last_shot_ms: 0,
            upgrade_level: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Point,
    pub kind: EnemyKind,
    pub color: Rgb,
    pub health: i32,
    pub speed: u32,
    pub damage: i32,
    pub path: Vec<Point>,
    /// Index of the next waypoint to step onto.
    pub path_index: usize,
}

impl Enemy {
    /// Enemy entering at the top edge, walking straight down.
    pub fn spawn(kind: EnemyKind, x: f32, rules: &Rules) -> Self {
        let path = (0..rules.path_length)
            .map(|i| Point::new(x, i as f32 * rules.path_spacing))
            .collect();
        Enemy {
            position: Point::new(x, 0.0),
            kind,
            color: kind.color(),
            health: kind.max_health(),
            speed: kind.speed(),
            damage: kind.contact_damage(),
            path,
            path_index: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// A projectile flying toward a point fixed at fire time.  It does not
/// track the enemy it was aimed at.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Point,
    pub target: Point,
    pub damage: u32,
    pub speed: f32,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// All state for one run.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Drops below zero on a big leak; the renderer clamps it.
    pub base_health: i32,
    pub gold: u32,
    pub wave: u32,
    pub mode: Option<Mode>,
    pub screen: Screen,
    pub units: Vec<Unit>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Message for the player, e.g. a refused purchase.
    pub notice: Option<String>,
    pub kills: u32,
    pub leaks: u32,
    pub rules: Rules,
}

impl GameSession {
    pub fn new(rules: Rules) -> Self {
        GameSession {
            base_health: rules.starting_base_health,
            gold: rules.starting_gold,
            wave: 0,
            mode: None,
            screen: Screen::Menu,
            units: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            notice: None,
            kills: 0,
            leaks: 0,
            rules,
        }
    }

    pub fn wave_cap(&self) -> Option<u32> {
        self.mode.and_then(Mode::wave_cap)
    }
}
