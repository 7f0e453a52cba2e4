//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Rejected palette mutations. The palette is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette is full ({0} entries)")]
    Full(usize),

    #[error("no palette slot {slot} (palette has {len} entries)")]
    InvalidSlot { slot: usize, len: usize },

    #[error("not a 6-digit hex color: {0:?}")]
    InvalidHex(String),

    #[error("cannot remove the last palette entry")]
    LastEntry,
}
