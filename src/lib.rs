//! Terminal Conway's Game of Life with live resizing and paint tools.
//!
//! The simulation itself lives in [`life`]; the rest is the terminal viewer
//! that drives it.

pub mod colors;
pub mod config;
pub mod error;
pub mod help;
pub mod life;
pub mod settings;
pub mod terminal;
pub mod viz;

pub use config::LifeConfig;
pub use life::Life;
