// Copyright 2020-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{fmt, time::Duration};

use crate::{
    config::{Animation, Config, Size, Theme, ToastKind},
    timeout::Timeout,
};

/// Identifier of a toast, unique within its manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    pub(crate) fn from_seq(seq: u64) -> Self {
        ToastId(format!("toast_{}", seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a toast.
///
/// `Showing <-> Paused` any number of times, then `Closing -> Closed`.
/// A `Closed` toast is gone from its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    Showing,
    Paused,
    Closing,
    Closed,
}

impl ToastState {
    /// Showing or paused, i.e. counted against `max-toasts`.
    pub fn is_active(&self) -> bool {
        matches!(self, ToastState::Showing | ToastState::Paused)
    }
}

/// A button rendered next to the message.
///
/// The host reports presses with its own events, `key` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub key: String,
}

impl Action {
    pub fn new(label: &str, key: &str) -> Action {
        Action {
            label: label.to_owned(),
            key: key.to_owned(),
        }
    }
}

/// Per toast overrides of the manager [`Config`].
///
/// Every field left unset takes the manager's value.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    pub kind: Option<ToastKind>,
    pub timeout: Option<Timeout>,
    pub description: Option<String>,
    pub actions: Option<Vec<Action>>,
    pub animation: Option<Animation>,
    pub theme: Option<Theme>,
    pub size: Option<Size>,
    pub show_progress_bar: Option<bool>,
    pub closable: Option<bool>,
    pub show_icon: Option<bool>,
    pub play_sound: Option<bool>,
    pub rtl: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub click_to_close: Option<bool>,
}

impl ToastOptions {
    /// Constructs options that override nothing.
    pub fn new() -> ToastOptions {
        ToastOptions::default()
    }

    pub fn kind(&mut self, kind: ToastKind) -> &mut ToastOptions {
        self.kind = Some(kind);
        self
    }

    /// Set the `timeout`.
    ///
    /// [`Timeout::Never`] keeps the toast until it is closed, a fixed
    /// [`Timeout::Milliseconds`] enables auto close even when the manager
    /// has it turned off.
    pub fn timeout(&mut self, timeout: Timeout) -> &mut ToastOptions {
        self.timeout = Some(timeout);
        self
    }

    /// Set the secondary line shown under the message.
    ///
    /// Plain text, the host never interprets markup.
    pub fn description(&mut self, description: &str) -> &mut ToastOptions {
        self.description = Some(description.to_owned());
        self
    }

    pub fn action(&mut self, action: Action) -> &mut ToastOptions {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    pub fn animation(&mut self, animation: Animation) -> &mut ToastOptions {
        self.animation = Some(animation);
        self
    }

    pub fn theme(&mut self, theme: Theme) -> &mut ToastOptions {
        self.theme = Some(theme);
        self
    }

    pub fn size(&mut self, size: Size) -> &mut ToastOptions {
        self.size = Some(size);
        self
    }

    pub fn show_progress_bar(&mut self, show: bool) -> &mut ToastOptions {
        self.show_progress_bar = Some(show);
        self
    }

    pub fn closable(&mut self, closable: bool) -> &mut ToastOptions {
        self.closable = Some(closable);
        self
    }

    pub fn show_icon(&mut self, show: bool) -> &mut ToastOptions {
        self.show_icon = Some(show);
        self
    }

    pub fn play_sound(&mut self, play: bool) -> &mut ToastOptions {
        self.play_sound = Some(play);
        self
    }

    pub fn rtl(&mut self, rtl: bool) -> &mut ToastOptions {
        self.rtl = Some(rtl);
        self
    }

    pub fn pause_on_hover(&mut self, pause: bool) -> &mut ToastOptions {
        self.pause_on_hover = Some(pause);
        self
    }

    pub fn click_to_close(&mut self, close: bool) -> &mut ToastOptions {
        self.click_to_close = Some(close);
        self
    }

    pub(crate) fn resolve(&self, config: &Config) -> Resolved {
        let (duration, auto_close) = self
            .timeout
            .unwrap_or_default()
            .resolve(config.duration(), config.auto_close);

        Resolved {
            kind: self.kind.unwrap_or(config.kind),
            animation: self.animation.unwrap_or(config.animation),
            theme: self.theme.unwrap_or(config.theme),
            size: self.size.unwrap_or(config.size),
            duration,
            auto_close,
            show_progress_bar: self.show_progress_bar.unwrap_or(config.show_progress_bar),
            closable: self.closable.unwrap_or(config.closable),
            show_icon: self.show_icon.unwrap_or(config.show_icon),
            play_sound: self.play_sound.unwrap_or(config.play_sound),
            rtl: self.rtl.unwrap_or(config.rtl),
            pause_on_hover: self.pause_on_hover.unwrap_or(config.pause_on_hover),
            click_to_close: self.click_to_close.unwrap_or(config.click_to_close),
        }
    }
}

/// Options merged over the manager configuration, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolved {
    pub kind: ToastKind,
    pub animation: Animation,
    pub theme: Theme,
    pub size: Size,
    pub duration: Duration,
    pub auto_close: bool,
    pub show_progress_bar: bool,
    pub closable: bool,
    pub show_icon: bool,
    pub play_sound: bool,
    pub rtl: bool,
    pub pause_on_hover: bool,
    pub click_to_close: bool,
}

/// Everything a host needs to draw a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub message: String,
    pub description: Option<String>,
    pub actions: Vec<Action>,
    pub kind: ToastKind,
    pub animation: Animation,
    pub theme: Theme,
    pub size: Size,
    /// Total length of the progress bar, `None` when no bar is shown.
    pub progress: Option<Duration>,
    pub closable: bool,
    pub show_icon: bool,
    pub rtl: bool,
}

impl ToastView {
    pub(crate) fn new(
        id: ToastId,
        message: String,
        description: Option<String>,
        actions: Vec<Action>,
        resolved: &Resolved,
    ) -> Self {
        Self {
            id,
            message,
            description,
            actions,
            kind: resolved.kind,
            animation: resolved.animation,
            theme: resolved.theme,
            size: resolved.size,
            progress: (resolved.show_progress_bar && resolved.auto_close)
                .then_some(resolved.duration),
            closable: resolved.closable,
            show_icon: resolved.show_icon,
            rtl: resolved.rtl,
        }
    }
}
