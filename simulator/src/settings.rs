//! Settings document loader.
//!
//! The document is TOML with one optional table per channel and an optional
//! `general` table:
//!
//! ```toml
//! [channel1]
//! enabled = true
//! auto_water = true
//! water_level = 0.4
//!
//! [general]
//! alarm_enable = true
//! alarm_interval = 10.0
//! ```
//!
//! The whole document is parsed and validated before any of it is applied,
//! so a bad value never leaves the channels half-configured.

use std::path::{Path, PathBuf};
use std::{fs, io};

use grow_common::config::CHANNEL_COUNT;
use grow_common::{ChannelSettings, GeneralSettings, SettingsFault};
use thiserror::Error;
use tracing::info;

/// Reasons the settings document cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing settings: {0}")]
    Syntax(#[source] toml::de::Error),

    #[error("invalid value in [{table}]: {source}")]
    Type {
        table: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value in [{table}]: {fault}")]
    Range {
        table: String,
        #[source]
        fault: SettingsFault,
    },
}

/// Validated settings, ready to apply.
#[derive(Debug, Default, PartialEq)]
pub struct Settings {
    /// Overrides for channel 1..=N, `None` where the table is absent.
    pub channels: [Option<ChannelSettings>; CHANNEL_COUNT],
    pub general: GeneralSettings,
}

impl Settings {
    /// Read and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            info!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Parse and validate a settings document.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let document: toml::Table = text.parse().map_err(SettingsError::Syntax)?;
        let mut settings = Self::default();

        for (idx, slot) in settings.channels.iter_mut().enumerate() {
            let table = format!("channel{}", idx + 1);
            if let Some(value) = document.get(&table) {
                let channel: ChannelSettings = decode(&table, value)?;
                channel.validate().map_err(|fault| SettingsError::Range {
                    table: table.clone(),
                    fault,
                })?;
                *slot = Some(channel);
            }
        }

        if let Some(value) = document.get("general") {
            let general: GeneralSettings = decode("general", value)?;
            general.validate().map_err(|fault| SettingsError::Range {
                table: "general".to_owned(),
                fault,
            })?;
            settings.general = general;
        }

        Ok(settings)
    }

    /// Settings for channel `id` (1-based).
    pub fn channel(
        &self,
        id: u8,
    ) -> Option<&ChannelSettings> {
        let idx = usize::from(id).checked_sub(1)?;
        self.channels.get(idx)?.as_ref()
    }
}

fn decode<T>(
    table: &str,
    value: &toml::Value,
) -> Result<T, SettingsError>
where
    T: serde::de::DeserializeOwned,
{
    value.clone().try_into().map_err(|source| SettingsError::Type {
        table: table.to_owned(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
