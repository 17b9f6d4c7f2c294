//! Skill training automation for Skyrim Special Edition.
//!
//! The game is driven from the outside only: screen captures go through the
//! `ie` image engine, and keyboard and mouse input is injected into the
//! focused game window.

mod error;
pub use error::{Error, Result};

pub mod action;
pub mod assets;
pub mod cancel;
pub mod capture;
pub mod clock;
pub mod config;
pub mod equip;
pub mod game;
pub mod input;
pub mod locator;
pub mod logging;
pub mod perception;
pub mod registry;
pub mod runner;
pub mod session;
pub mod training;

#[cfg(test)]
mod testing;

pub use cancel::CancellationToken;
pub use config::Config;
pub use training::Completion;
