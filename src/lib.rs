// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Transient toast notifications over a pluggable host.
//!
//! [`ToastManager`] owns the toasts: it times them out, pauses and resumes
//! their countdown, evicts the oldest when too many are showing and runs the
//! close sequence. Drawing is left to a [`Host`]; on Windows [`win32::Win32Host`]
//! draws each toast as a small popup window.
//!
//! # Note:
//!
//! The manager schedules its timers with [`tokio::task::spawn_local`], it must be
//! driven from a [`tokio::task::LocalSet`] on a current thread runtime.
//!
//! # Examples
//!
//! # Example 1: Simple Toast
//!
//! ```no_run
//! # use toastkit::*;
//! # fn demo<H: Host + 'static>(host: H) {
//! let toasts = ToastManager::new(host, Config::default());
//! toasts.success("Image saved", ToastOptions::new().description("photo.png"));
//! # }
//! ```
//!
//! # Example 2: Persistent Toast
//!
//! ```no_run
//! # use toastkit::*;
//! # async fn demo<H: Host + 'static>(toasts: ToastManager<H>) {
//! let id = toasts.show(
//!     "Connection lost",
//!     ToastOptions::new()
//!         .kind(ToastKind::Error)
//!         .timeout(Timeout::Never),
//! );
//! // later
//! toasts.close(&id).await;
//! # }
//! ```
//!

mod config;
mod error;
mod host;
mod manager;
mod timeout;
mod toast;

#[cfg(windows)]
pub mod win32;

pub use crate::{
    config::{Animation, Config, Position, Size, Theme, ToastKind},
    error::{ConfigError, SoundError},
    host::{Host, HostEvent, Placement, Silent, SoundPlayer, SoundRequest, Transition},
    manager::{ToastManager, EXIT_DELAY},
    timeout::Timeout,
    toast::{Action, ToastId, ToastOptions, ToastState, ToastView},
};
