// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Manager wide settings and the named options toasts can pick from.
//!
//! Named options are parsed leniently: an unknown name logs a warning and
//! falls back to the option's default, so a typo in a settings file degrades
//! the look of a toast instead of failing the whole configuration.

use serde::Deserialize;
use std::{fmt, str::FromStr, time::Duration};

use crate::{error::ConfigError, host::Placement};

pub const DEFAULT_DURATION_MS: u32 = 4000;
pub const DEFAULT_MAX_TOASTS: usize = 5;
pub const DEFAULT_SPACING: u32 = 10;
pub const DEFAULT_VOLUME: f32 = 0.3;
pub const DEFAULT_SOUND_DIR: &str = "/sounds";

macro_rules! named_option {
    (
        $(#[$meta:meta])*
        $name:ident, key = $key:literal, default = $default:ident,
        { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Name used in configuration files.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parses `name`, falling back to the default for unknown names.
            pub fn parse_lossy(name: &str) -> Self {
                name.parse().unwrap_or_else(|_| {
                    tracing::warn!(
                        key = $key,
                        value = name,
                        fallback = $name::$default.as_str(),
                        "unknown toast option, using default"
                    );
                    $name::$default
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ConfigError::InvalidValue {
                        key: $key,
                        reason: format!("unknown name `{}`", other),
                    }),
                }
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::parse_lossy(&name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_option! {
    /// Kind of a toast, selects colours and the notification sound.
    ToastKind, key = "type", default = Info,
    {
        Success => "success",
        Error => "error",
        Warning => "warning",
        Info => "info",
        /// Spinner style toast, has no sound.
        Loading => "loading",
    }
}

named_option! {
    /// Enter/exit animation preset.
    Animation, key = "animation", default = Slide,
    {
        Slide => "slide",
        Fade => "fade",
        Bounce => "bounce",
        Zoom => "zoom",
        Flip => "flip",
    }
}

named_option! {
    /// Screen corner (or centre) the toast container is anchored to.
    Position, key = "position", default = TopRight,
    {
        TopLeft => "top-left",
        TopRight => "top-right",
        BottomLeft => "bottom-left",
        BottomRight => "bottom-right",
        Center => "center",
    }
}

named_option! {
    Theme, key = "theme", default = Modern,
    {
        Modern => "modern",
        Classic => "classic",
        Minimal => "minimal",
        Glassmorphism => "glassmorphism",
    }
}

named_option! {
    Size, key = "size", default = Medium,
    {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

impl ToastKind {
    /// Sound asset played when a toast of this kind is shown.
    pub fn sound(&self) -> Option<&'static str> {
        match self {
            ToastKind::Success => Some("success.mp3"),
            ToastKind::Error => Some("error.mp3"),
            ToastKind::Warning => Some("warning.mp3"),
            ToastKind::Info => Some("info.mp3"),
            ToastKind::Loading => None,
        }
    }
}

/// Settings shared by every toast of a manager.
///
/// Keys use the kebab-case names of the settings file, e.g.
///
/// ```toml
/// position = "bottom-left"
/// duration = 2500
/// type = "success"
/// max-toasts = 3
/// pause-on-hover = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub position: Position,
    /// Auto close delay in milliseconds.
    pub duration: u32,
    pub animation: Animation,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub show_progress_bar: bool,
    pub closable: bool,
    pub show_icon: bool,
    pub play_sound: bool,
    pub max_toasts: usize,
    /// Gap between stacked toasts, in host units (pixels for the Win32 host).
    pub spacing: u32,
    pub theme: Theme,
    pub size: Size,
    pub rtl: bool,
    pub auto_close: bool,
    pub pause_on_hover: bool,
    pub click_to_close: bool,
    /// Pause every toast while the host window is unfocused or hidden.
    pub pause_when_inactive: bool,
    /// Directory sound assets are resolved against.
    pub sound_dir: String,
    pub volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            duration: DEFAULT_DURATION_MS,
            animation: Animation::Slide,
            kind: ToastKind::Info,
            show_progress_bar: true,
            closable: true,
            show_icon: true,
            play_sound: false,
            max_toasts: DEFAULT_MAX_TOASTS,
            spacing: DEFAULT_SPACING,
            theme: Theme::Modern,
            size: Size::Medium,
            rtl: true,
            auto_close: true,
            pause_on_hover: true,
            click_to_close: false,
            pause_when_inactive: true,
            sound_dir: DEFAULT_SOUND_DIR.to_owned(),
            volume: DEFAULT_VOLUME,
        }
    }
}

impl Config {
    /// Parses a TOML settings document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Rejects values the manager would otherwise silently replace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_toasts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max-toasts",
                reason: "must allow at least one toast".to_owned(),
            });
        }
        if self.auto_close && self.duration == 0 {
            return Err(ConfigError::InvalidValue {
                key: "duration",
                reason: "must be positive when auto-close is enabled".to_owned(),
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::InvalidValue {
                key: "volume",
                reason: format!("{} is outside 0.0..=1.0", self.volume),
            });
        }
        Ok(())
    }

    /// Replaces unusable values with their defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.max_toasts == 0 {
            tracing::warn!(fallback = DEFAULT_MAX_TOASTS, "max-toasts is 0, using default");
            self.max_toasts = DEFAULT_MAX_TOASTS;
        }
        if self.auto_close && self.duration == 0 {
            tracing::warn!(fallback = DEFAULT_DURATION_MS, "duration is 0, using default");
            self.duration = DEFAULT_DURATION_MS;
        }
        if !(0.0..=1.0).contains(&self.volume) {
            tracing::warn!(
                volume = self.volume,
                fallback = DEFAULT_VOLUME,
                "volume out of range, using default"
            );
            self.volume = DEFAULT_VOLUME;
        }
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration.into())
    }

    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            spacing: self.spacing,
            rtl: self.rtl,
        }
    }
}
