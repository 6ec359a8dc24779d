/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; world coordinates are scaled onto
/// whatever terminal size is current.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use snake_tower_defense::entities::{
    Bullet, Enemy, EnemyKind, GameSession, Mode, Point, Rgb, Screen, Unit, UnitKind,
};
use snake_tower_defense::screen::UPGRADE_SLOTS;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Cyan;
const C_HUD_WAVE: Color = Color::White;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_GOLD: Color = Color::Yellow;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Magenta;

/// Rows 0-1 hold the HUD; the bordered field starts below.
const FIELD_TOP: u16 = 2;

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever screen is active.
pub fn render<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Menu => draw_menu(out, state, width, height)?,
        Screen::Playing => draw_field(out, state, width, height)?,
        Screen::Upgrade => draw_upgrade_menu(out, state, width)?,
        Screen::Shop => draw_shop(out, state, width)?,
        Screen::Won | Screen::Lost => draw_end_screen(out, state, width, height)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_at<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn print_centered<W: Write>(out: &mut W, width: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    print_at(out, col, row, color, text)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameSession, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    print_centered(out, width, cy.saturating_sub(6), C_TITLE, "SNAKE TOWER DEFENSE")?;

    let left = (width / 2).saturating_sub(14);
    print_at(out, left, cy.saturating_sub(4), Color::White, "Select mode:")?;
    for (i, mode) in Mode::ALL.iter().enumerate() {
        let waves = match mode.wave_cap() {
            Some(cap) => format!("{cap} waves"),
            None => "no wave limit".to_string(),
        };
        let row = cy.saturating_sub(2) + i as u16;
        print_at(out, left, row, C_HINT, &format!("[{}] ", i + 1))?;
        print_at(out, left + 4, row, Color::White, &format!("{:<8} {}", mode.name(), waves))?;
    }

    if state.wave > 0 {
        let resume = format!("Run in progress: wave {}, gold {}", state.wave, state.gold);
        print_centered(out, width, cy + 3, C_HUD_GOLD, &resume)?;
    }
    print_centered(out, width, cy + 5, C_HINT, "Press 1-4 to select   ESC : Quit")?;
    Ok(())
}

// ── Playing field ─────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, state: &GameSession, width: u16, height: u16) -> std::io::Result<()> {
    draw_hud(out, state)?;
    draw_border(out, width, height)?;

    for unit in &state.units {
        draw_unit(out, state, unit, width, height)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, state, enemy, width, height)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, state, bullet, width, height)?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    let cap = match state.wave_cap() {
        Some(cap) => cap.to_string(),
        None => "∞".to_string(),
    };
    let wave = format!("Wave: {}/{}", state.wave, cap);
    let health = format!("Base Health: {}", state.base_health.max(0));
    let gold = format!("Gold: {}", state.gold);

    print_at(out, 1, 0, C_HUD_WAVE, &wave)?;
    let col = 3 + wave.chars().count() as u16;
    print_at(out, col, 0, C_HUD_HEALTH, &health)?;
    let col = col + 2 + health.chars().count() as u16;
    print_at(out, col, 0, C_HUD_GOLD, &gold)?;

    print_at(out, 1, 1, C_HINT, "U : Upgrades   S : Shop   ESC : Menu")?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in FIELD_TOP + 1..height.saturating_sub(1) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

/// Map a world point onto the cell grid inside the border.
fn to_cell(state: &GameSession, p: Point, width: u16, height: u16) -> (u16, u16) {
    let cols = width.saturating_sub(3).max(1) as f32;
    let rows = height.saturating_sub(FIELD_TOP + 3).max(1) as f32;
    let fx = (p.x / state.rules.world_width as f32).clamp(0.0, 1.0);
    let fy = (p.y / state.rules.world_height as f32).clamp(0.0, 1.0);
    let col = 1 + (fx * cols).round() as u16;
    let row = FIELD_TOP + 1 + (fy * rows).round() as u16;
    (col, row)
}

fn draw_unit<W: Write>(out: &mut W, state: &GameSession, unit: &Unit, width: u16, height: u16) -> std::io::Result<()> {
    let (col, row) = to_cell(state, unit.position, width, height);
    let glyph = match unit.kind {
        UnitKind::FireSnake => "§",
        UnitKind::WaterSnake => "≈",
        UnitKind::DirtSnake => "∫",
    };
    print_at(out, col, row, rgb(unit.color), glyph)
}

fn draw_enemy<W: Write>(out: &mut W, state: &GameSession, enemy: &Enemy, width: u16, height: u16) -> std::io::Result<()> {
    let (col, row) = to_cell(state, enemy.position, width, height);
    let glyph = match enemy.kind {
        EnemyKind::Diddy => "●",
        EnemyKind::Skibidi => "◉",
        EnemyKind::Boss => "☻",
    };
    print_at(out, col, row, rgb(enemy.color), glyph)
}

fn draw_bullet<W: Write>(out: &mut W, state: &GameSession, bullet: &Bullet, width: u16, height: u16) -> std::io::Result<()> {
    let (col, row) = to_cell(state, bullet.position, width, height);
    print_at(out, col, row, C_BULLET, "·")
}

// ── Sub-screens ───────────────────────────────────────────────────────────────

fn draw_notice<W: Write>(out: &mut W, state: &GameSession, row: u16) -> std::io::Result<()> {
    if let Some(notice) = &state.notice {
        print_at(out, 4, row, C_NOTICE, notice)?;
    }
    Ok(())
}

fn draw_upgrade_menu<W: Write>(out: &mut W, state: &GameSession, width: u16) -> std::io::Result<()> {
    print_centered(out, width, 1, C_TITLE, "Upgrade Menu")?;
    print_at(out, 4, 3, C_HUD_GOLD, &format!("Gold: {}", state.gold))?;

    if state.units.is_empty() {
        print_at(out, 4, 5, C_HINT, "No units yet - summon some in the shop.")?;
    } else {
        let shown = state.units.len().min(UPGRADE_SLOTS);
        print_at(out, 4, 5, Color::White, &format!("Select unit to upgrade (1-{shown}):"))?;
    }
    for (i, unit) in state.units.iter().take(UPGRADE_SLOTS).enumerate() {
        let line = format!(
            "{}. {:<12} Level {:<3} Damage {:<4} (Cost: {})",
            i + 1,
            unit.kind.name(),
            unit.upgrade_level,
            unit.damage,
            state.rules.upgrade_cost
        );
        print_at(out, 4, 7 + i as u16, rgb(unit.color), &line)?;
    }

    let footer = 8 + UPGRADE_SLOTS as u16;
    draw_notice(out, state, footer)?;
    print_at(out, 4, footer + 2, C_HINT, "Press ESC to return")?;
    Ok(())
}

fn draw_shop<W: Write>(out: &mut W, state: &GameSession, width: u16) -> std::io::Result<()> {
    print_centered(out, width, 1, C_TITLE, "Summon Shop")?;
    print_at(out, 4, 3, C_HUD_GOLD, &format!("Gold: {}", state.gold))?;
    print_at(out, 4, 5, Color::White, "Select unit to summon:")?;

    for (i, kind) in UnitKind::ALL.iter().enumerate() {
        let line = format!(
            "{}. {:<12} Damage {:<3} Range {:<4} (Cost: {})",
            i + 1,
            kind.name(),
            kind.base_damage(),
            kind.range(),
            kind.cost()
        );
        print_at(out, 4, 7 + i as u16, rgb(kind.color()), &line)?;
    }

    let footer = 8 + UnitKind::ALL.len() as u16;
    draw_notice(out, state, footer)?;
    print_at(out, 4, footer + 2, C_HINT, "Press ESC to return")?;
    Ok(())
}

// ── End screen ────────────────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(out: &mut W, state: &GameSession, width: u16, height: u16) -> std::io::Result<()> {
    let (banner, color) = match state.screen {
        Screen::Won => ("You win!", Color::Green),
        _ => ("You lose!", Color::Red),
    };
    let cy = height / 2;
    print_centered(out, width, cy.saturating_sub(3), color, banner)?;

    let stats = format!(
        "Waves: {}   Kills: {}   Leaks: {}   Gold: {}",
        state.wave, state.kills, state.leaks, state.gold
    );
    print_centered(out, width, cy.saturating_sub(1), Color::White, &stats)?;
    print_centered(out, width, cy + 1, C_HINT, "Press R to restart, ESC to quit")?;
    Ok(())
}
