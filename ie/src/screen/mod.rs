//! Screen-specific interpretation of captured regions.
//!
//! Each module knows what one part of the game's HUD looks like and turns a
//! crop of it into a typed reading.

pub mod favorites;
pub mod hud;
pub mod menu;
