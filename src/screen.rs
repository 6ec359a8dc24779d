/// Screen state machine and input dispatch.
///
/// One flat machine replaces nested menu loops: the upgrade and shop
/// screens are ordinary states, and the simulation only advances while the
/// screen is `Playing`.
///
/// ```text
///   Menu ──1-4──▶ Playing ──u/s──▶ Upgrade | Shop ──Esc──▶ Playing
///    ▲  ◀──Esc──────┘  │
///    │                 ├─ base destroyed ──▶ Lost ─┐
///    │                 └─ all waves clear ─▶ Won  ─┤
///    └──────────────── r (fresh session) ──────────┘
/// ```

use rand::Rng;

use crate::economy;
use crate::entities::{GameSession, Mode, Screen, UnitKind};
use crate::error::EconomyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// One polled input: a key press or a request to close the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(Key),
}

#[derive(Clone, Debug)]
pub enum Flow {
    Continue(GameSession),
    Quit,
}

/// Upgrade screen slots are picked with `1`..=`9`.
pub const UPGRADE_SLOTS: usize = 9;

/// `'1'` → `Some(0)`, `'9'` → `Some(8)`; anything else → `None`.
fn digit_index(key: Key) -> Option<usize> {
    match key {
        Key::Char(c @ '1'..='9') => Some(c as usize - '1' as usize),
        _ => None,
    }
}

fn is_char(key: Key, wanted: char) -> bool {
    matches!(key, Key::Char(c) if c.eq_ignore_ascii_case(&wanted))
}

fn with_screen(state: &GameSession, screen: Screen) -> GameSession {
    GameSession {
        screen,
        notice: None,
        ..state.clone()
    }
}

/// Menu → Playing with the chosen mode.  Whatever run was in progress
/// carries on under the new mode.
pub fn select_mode(state: &GameSession, mode: Mode) -> GameSession {
    tracing::info!(%mode, wave = state.wave, "run started");
    GameSession {
        mode: Some(mode),
        ..with_screen(state, Screen::Playing)
    }
}

/// Back to a fresh run on the menu, keeping the configured rules.
pub fn reset(state: &GameSession) -> GameSession {
    GameSession::new(state.rules)
}

fn refused(state: &GameSession, err: EconomyError) -> GameSession {
    tracing::debug!(%err, "purchase refused");
    let notice = match err {
        EconomyError::InsufficientFunds { .. } => "Not enough gold".to_string(),
        EconomyError::NoSuchUnit { .. } => return state.clone(),
    };
    GameSession {
        notice: Some(notice),
        ..state.clone()
    }
}

/// Apply one input to the session.
pub fn handle_event(state: &GameSession, event: &InputEvent, rng: &mut impl Rng) -> Flow {
    let key = match event {
        InputEvent::Quit => return Flow::Quit,
        InputEvent::Key(key) => *key,
    };

    let next = match state.screen {
        Screen::Menu => {
            if key == Key::Escape {
                return Flow::Quit;
            }
            match digit_index(key).and_then(|i| Mode::ALL.get(i)) {
                Some(&mode) => select_mode(state, mode),
                None => state.clone(),
            }
        }
        Screen::Playing => {
            if key == Key::Escape {
                tracing::info!(wave = state.wave, "returned to menu");
                with_screen(state, Screen::Menu)
            } else if is_char(key, 'u') {
                with_screen(state, Screen::Upgrade)
            } else if is_char(key, 's') {
                with_screen(state, Screen::Shop)
            } else {
                state.clone()
            }
        }
        Screen::Upgrade => match key {
            Key::Escape => with_screen(state, Screen::Playing),
            _ => match digit_index(key) {
                Some(i) => economy::upgrade_unit(state, i).unwrap_or_else(|err| refused(state, err)),
                None => state.clone(),
            },
        },
        Screen::Shop => match key {
            Key::Escape => with_screen(state, Screen::Playing),
            _ => match digit_index(key).and_then(|i| UnitKind::ALL.get(i)) {
                Some(&kind) => {
                    economy::summon_unit(state, kind, rng).unwrap_or_else(|err| refused(state, err))
                }
                None => state.clone(),
            },
        },
        Screen::Won | Screen::Lost => {
            if key == Key::Escape {
                return Flow::Quit;
            }
            if is_char(key, 'r') {
                tracing::info!("run reset");
                reset(state)
            } else {
                state.clone()
            }
        }
    };

    Flow::Continue(next)
}
