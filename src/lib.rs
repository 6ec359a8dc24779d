//! Snake tower defense: game logic only.
//!
//! Terminal I/O lives in the binary (`main.rs` / `display.rs`); everything
//! here is deterministic given an injected RNG and clock.

pub mod compute;
pub mod config;
pub mod economy;
pub mod entities;
pub mod error;
pub mod screen;
