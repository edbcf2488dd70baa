// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors reported by the strict configuration path.
///
/// The permissive path ([`ToastManager::new`](crate::ToastManager::new)) never
/// returns these, it falls back to defaults instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration text is not valid TOML or has a mistyped key.
    #[error("failed to parse toast configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside of the range the manager can work with.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors a [`SoundPlayer`](crate::SoundPlayer) may report.
///
/// The manager logs and ignores them.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SoundError {
    #[error("sound asset `{0}` could not be played")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
