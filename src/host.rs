// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The seams between the manager and whatever actually draws toasts.

use std::path::PathBuf;

use crate::{
    config::{Animation, Position},
    error::SoundError,
    toast::{ToastId, ToastView},
};

/// Where the toast container sits and how its children are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub spacing: u32,
    pub rtl: bool,
}

/// Named visual state change requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Run the enter animation of a freshly created node.
    Enter(Animation),
    /// Run the exit animation. The node is removed after the exit delay.
    Exit(Animation),
    /// Freeze the progress indicator (toast paused).
    Freeze,
    /// Let the progress indicator run again (toast resumed).
    Run,
}

/// Renders toasts. The manager never inspects how.
///
/// Calls arrive on the thread driving the manager, in lifecycle order:
/// `create`, `transition(Enter)`, any number of `update`/`Freeze`/`Run`,
/// `transition(Exit)` and finally `remove`.
pub trait Host {
    /// (Re)applies container placement. Called at construction and on `configure`.
    fn place_container(&mut self, placement: &Placement);

    fn create(&mut self, view: &ToastView);

    /// Replaces the content of an existing node.
    fn update(&mut self, view: &ToastView);

    fn transition(&mut self, id: &ToastId, transition: Transition);

    fn remove(&mut self, id: &ToastId);
}

/// Input the host forwards back to the manager through
/// [`ToastManager::handle_event`](crate::ToastManager::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    PointerEnter(ToastId),
    PointerLeave(ToastId),
    /// A click anywhere on the toast. `on_control` is set when it landed on a
    /// button (close or action) which handles the click itself.
    Clicked { id: ToastId, on_control: bool },
    /// The close button was pressed.
    CloseRequested(ToastId),
    FocusLost,
    FocusGained,
    VisibilityChanged { hidden: bool },
}

/// A sound the manager wants played.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub path: PathBuf,
    pub volume: f32,
}

/// Plays notification sounds. Errors are logged and otherwise ignored.
pub trait SoundPlayer {
    fn play(&mut self, request: &SoundRequest) -> Result<(), SoundError>;
}

/// A [`SoundPlayer`] that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _request: &SoundRequest) -> Result<(), SoundError> {
        Ok(())
    }
}
