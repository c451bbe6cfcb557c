//! Errors that end a simulator run.

use std::path::PathBuf;

use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("no channel {0} to unplug (expected 1..={max})", max = grow_common::config::CHANNEL_COUNT)]
    UnknownChannel(u8),

    #[error("display error: {0}")]
    Display(String),

    #[error("cannot save screenshot {}: {reason}", .path.display())]
    Screenshot { path: PathBuf, reason: String },
}
