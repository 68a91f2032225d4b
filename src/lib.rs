//! Abyss Sampler: a deep-sea creature sampling minigame.
//!
//! The core (`coords` through `session`) is plain Rust and fully testable
//! without an app; the Bevy plugins (`menu`, `input`, `viewport`, `hud`,
//! `panels`) only feed key edges into [`session::GameSession`] and copy its
//! state onto UI nodes.

pub mod anchors;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod hud;
pub mod input;
pub mod inventory;
pub mod menu;
pub mod panels;
pub mod placement;
pub mod scheduler;
pub mod session;
pub mod targeting;
pub mod viewport;
pub mod visibility;
