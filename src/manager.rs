// Copyright 2020-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use futures_util::future::join_all;
use indexmap::IndexMap;
use std::{
    cell::RefCell,
    future::Future,
    path::Path,
    rc::{Rc, Weak},
    time::Duration,
};
use tokio::{
    sync::watch,
    task::{self, AbortHandle},
    time::{self, Instant},
};

use crate::{
    config::{Config, ToastKind},
    error::ConfigError,
    host::{Host, HostEvent, SoundPlayer, SoundRequest, Silent, Transition},
    timeout::Countdown,
    toast::{Action, Resolved, ToastId, ToastOptions, ToastState, ToastView},
};

/// How long a closing toast keeps its node for the exit animation.
pub const EXIT_DELAY: Duration = Duration::from_millis(200);

struct Entry {
    message: String,
    description: Option<String>,
    actions: Vec<Action>,
    resolved: Resolved,
    state: ToastState,
    countdown: Countdown,
    timer: Option<AbortHandle>,
    /// Bumped whenever the timer is cancelled or rearmed, a firing timer with
    /// an older generation is stale.
    generation: u64,
    closed: watch::Sender<ToastState>,
}

impl Entry {
    fn view(&self, id: &ToastId) -> ToastView {
        ToastView::new(
            id.clone(),
            self.message.clone(),
            self.description.clone(),
            self.actions.clone(),
            &self.resolved,
        )
    }

    fn set_state(&mut self, state: ToastState) {
        self.state = state;
        self.closed.send_replace(state);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation += 1;
    }
}

struct State {
    config: Config,
    /// Insertion ordered, the first active entry is the oldest.
    toasts: IndexMap<ToastId, Entry>,
    next_seq: u64,
}

impl State {
    fn active_count(&self) -> usize {
        self.toasts.values().filter(|e| e.state.is_active()).count()
    }
}

struct Inner<H> {
    state: RefCell<State>,
    host: RefCell<H>,
    sound: RefCell<Box<dyn SoundPlayer>>,
}

/// Owns every toast and drives its lifecycle.
///
/// # Note:
///
/// Timers run as [`tokio::task::spawn_local`] tasks, so the manager must be
/// used from inside a [`tokio::task::LocalSet`] on a current thread runtime,
/// otherwise the first [`show`](Self::show) panics.
///
/// The handle is cheap to clone; clones share the same toasts. A [`Host`]
/// must not call back into the manager from its own methods, it reports
/// input through [`handle_event`](Self::handle_event) instead.
pub struct ToastManager<H: Host + 'static> {
    inner: Rc<Inner<H>>,
}

impl<H: Host + 'static> Clone for ToastManager<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host + 'static> ToastManager<H> {
    /// Creates a manager, replacing unusable settings with defaults.
    pub fn new(mut host: H, config: Config) -> Self {
        let config = config.sanitized();
        host.place_container(&config.placement());

        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State {
                    config,
                    toasts: IndexMap::new(),
                    next_seq: 0,
                }),
                host: RefCell::new(host),
                sound: RefCell::new(Box::new(Silent)),
            }),
        }
    }

    /// Creates a manager, rejecting unusable settings.
    pub fn try_new(host: H, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(host, config))
    }

    /// Replaces the sound player. The default plays nothing.
    pub fn set_sound_player(&self, player: impl SoundPlayer + 'static) {
        *self.inner.sound.borrow_mut() = Box::new(player);
    }

    /// Shows a toast and returns its id right away.
    ///
    /// When `max-toasts` toasts are already active the oldest one is closed
    /// first.
    pub fn show(&self, message: &str, options: &ToastOptions) -> ToastId {
        let max_toasts = self.inner.state.borrow().config.max_toasts;
        while self.count() >= max_toasts {
            if self.remove_oldest().is_none() {
                break;
            }
        }

        let (id, view, resolved) = {
            let mut state = self.inner.state.borrow_mut();
            state.next_seq += 1;
            let id = ToastId::from_seq(state.next_seq);
            let resolved = options.resolve(&state.config);
            let (closed, _) = watch::channel(ToastState::Showing);

            let entry = Entry {
                message: message.to_owned(),
                description: options.description.clone(),
                actions: options.actions.clone().unwrap_or_default(),
                resolved,
                state: ToastState::Showing,
                countdown: Countdown::start(Instant::now(), resolved.duration),
                timer: None,
                generation: 0,
                closed,
            };
            let view = entry.view(&id);
            state.toasts.insert(id.clone(), entry);
            (id, view, resolved)
        };

        tracing::debug!(%id, kind = %resolved.kind, auto_close = resolved.auto_close, "showing toast");
        {
            let mut host = self.inner.host.borrow_mut();
            host.create(&view);
            host.transition(&id, Transition::Enter(resolved.animation));
        }

        if resolved.play_sound {
            self.play_sound(resolved.kind);
        }
        if resolved.auto_close {
            self.arm(&id);
        }
        id
    }

    pub fn success(&self, message: &str, options: &ToastOptions) -> ToastId {
        self.show_kind(ToastKind::Success, message, options)
    }

    pub fn error(&self, message: &str, options: &ToastOptions) -> ToastId {
        self.show_kind(ToastKind::Error, message, options)
    }

    pub fn warning(&self, message: &str, options: &ToastOptions) -> ToastId {
        self.show_kind(ToastKind::Warning, message, options)
    }

    pub fn info(&self, message: &str, options: &ToastOptions) -> ToastId {
        self.show_kind(ToastKind::Info, message, options)
    }

    pub fn loading(&self, message: &str, options: &ToastOptions) -> ToastId {
        self.show_kind(ToastKind::Loading, message, options)
    }

    fn show_kind(&self, kind: ToastKind, message: &str, options: &ToastOptions) -> ToastId {
        let mut options = options.clone();
        options.kind(kind);
        self.show(message, &options)
    }

    /// Replaces the message of a toast in place.
    ///
    /// `description`, `actions` and `kind` are taken from `options` when set,
    /// timing options are ignored. Unknown or closing toasts are left alone.
    pub fn update(&self, id: &ToastId, message: &str, options: &ToastOptions) {
        let view = {
            let mut state = self.inner.state.borrow_mut();
            let Some(entry) = state.toasts.get_mut(id) else {
                return;
            };
            if !entry.state.is_active() {
                return;
            }
            entry.message = message.to_owned();
            if let Some(description) = &options.description {
                entry.description = Some(description.clone());
            }
            if let Some(actions) = &options.actions {
                entry.actions = actions.clone();
            }
            if let Some(kind) = options.kind {
                entry.resolved.kind = kind;
            }
            entry.view(id)
        };
        self.inner.host.borrow_mut().update(&view);
    }

    /// Freezes the auto close countdown. Does nothing unless the toast is showing.
    pub fn pause(&self, id: &ToastId) {
        {
            let mut state = self.inner.state.borrow_mut();
            let Some(entry) = state.toasts.get_mut(id) else {
                return;
            };
            if entry.state != ToastState::Showing {
                return;
            }
            entry.cancel_timer();
            let remaining = entry.countdown.pause(Instant::now());
            entry.set_state(ToastState::Paused);
            tracing::debug!(%id, remaining_ms = remaining.as_millis() as u64, "paused toast");
        }
        self.inner.host.borrow_mut().transition(id, Transition::Freeze);
    }

    /// Restarts the countdown with the time left at pause. Does nothing unless
    /// the toast is paused.
    pub fn resume(&self, id: &ToastId) {
        let auto_close = {
            let mut state = self.inner.state.borrow_mut();
            let Some(entry) = state.toasts.get_mut(id) else {
                return;
            };
            if entry.state != ToastState::Paused {
                return;
            }
            let remaining = entry.countdown.resume(Instant::now());
            entry.set_state(ToastState::Showing);
            tracing::debug!(%id, remaining_ms = remaining.as_millis() as u64, "resumed toast");
            entry.resolved.auto_close
        };
        self.inner.host.borrow_mut().transition(id, Transition::Run);
        if auto_close {
            self.arm(id);
        }
    }

    pub fn pause_all(&self) {
        for id in self.ids() {
            self.pause(&id);
        }
    }

    pub fn resume_all(&self) {
        for id in self.ids() {
            self.resume(&id);
        }
    }

    /// Closes a toast.
    ///
    /// The toast moves to [`ToastState::Closing`] immediately; the returned
    /// future resolves once it reached [`ToastState::Closed`] and is gone.
    /// Dropping the future does not stop the close. Closing an unknown id
    /// resolves at once.
    pub fn close(&self, id: &ToastId) -> impl Future<Output = ()> + 'static {
        let closing = self.begin_close(id);
        async move {
            if let Some(mut closing) = closing {
                // an Err means the manager itself is gone, nothing left to wait for
                let _ = closing
                    .wait_for(|state| *state == ToastState::Closed)
                    .await;
            }
        }
    }

    /// Closes every toast and resolves once all of them are closed.
    pub fn close_all(&self) -> impl Future<Output = ()> + 'static {
        let closing: Vec<_> = self.ids().iter().map(|id| self.close(id)).collect();
        async move {
            join_all(closing).await;
        }
    }

    /// Starts closing the oldest showing or paused toast and returns its id.
    pub fn remove_oldest(&self) -> Option<ToastId> {
        let oldest = self
            .inner
            .state
            .borrow()
            .toasts
            .iter()
            .find(|(_, entry)| entry.state.is_active())
            .map(|(id, _)| id.clone())?;
        tracing::debug!(id = %oldest, "evicting oldest toast");
        self.begin_close(&oldest);
        Some(oldest)
    }

    /// Number of showing or paused toasts.
    pub fn count(&self) -> usize {
        self.inner.state.borrow().active_count()
    }

    /// Whether the manager still holds the toast, closing ones included.
    pub fn exists(&self, id: &ToastId) -> bool {
        self.inner.state.borrow().toasts.contains_key(id)
    }

    /// Current state, `None` once the toast is closed.
    pub fn state(&self, id: &ToastId) -> Option<ToastState> {
        self.inner.state.borrow().toasts.get(id).map(|e| e.state)
    }

    /// Time left before an auto closing toast closes itself. `None` once the
    /// toast is closing.
    pub fn remaining(&self, id: &ToastId) -> Option<Duration> {
        let state = self.inner.state.borrow();
        let entry = state.toasts.get(id)?;
        (entry.resolved.auto_close && entry.state.is_active())
            .then(|| entry.countdown.remaining_at(Instant::now()))
    }

    /// Ids of every toast held, oldest first.
    pub fn ids(&self) -> Vec<ToastId> {
        self.inner.state.borrow().toasts.keys().cloned().collect()
    }

    pub fn config(&self) -> Config {
        self.inner.state.borrow().config.clone()
    }

    /// Changes the configuration and re-applies container placement.
    ///
    /// Only toasts shown afterwards pick up new per toast defaults. Lowering
    /// `max-toasts` evicts the oldest toasts down to the new limit.
    pub fn configure(&self, change: impl FnOnce(&mut Config)) {
        let (placement, max_toasts) = {
            let mut state = self.inner.state.borrow_mut();
            let mut config = state.config.clone();
            change(&mut config);
            state.config = config.sanitized();
            (state.config.placement(), state.config.max_toasts)
        };

        self.inner.host.borrow_mut().place_container(&placement);
        while self.count() > max_toasts {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }

    /// Applies input reported by the host.
    pub fn handle_event(&self, event: HostEvent) {
        match event {
            HostEvent::PointerEnter(id) => {
                if self.resolved(&id).map_or(false, |r| r.pause_on_hover) {
                    self.pause(&id);
                }
            }
            HostEvent::PointerLeave(id) => {
                if self.resolved(&id).map_or(false, |r| r.pause_on_hover) {
                    self.resume(&id);
                }
            }
            HostEvent::Clicked { id, on_control } => {
                if !on_control && self.resolved(&id).map_or(false, |r| r.click_to_close) {
                    self.begin_close(&id);
                }
            }
            HostEvent::CloseRequested(id) => {
                self.begin_close(&id);
            }
            HostEvent::FocusLost | HostEvent::VisibilityChanged { hidden: true } => {
                if self.config().pause_when_inactive {
                    self.pause_all();
                }
            }
            HostEvent::FocusGained | HostEvent::VisibilityChanged { hidden: false } => {
                if self.config().pause_when_inactive {
                    self.resume_all();
                }
            }
        }
    }

    fn resolved(&self, id: &ToastId) -> Option<Resolved> {
        self.inner.state.borrow().toasts.get(id).map(|e| e.resolved)
    }

    /// (Re)starts the auto close timer with the countdown's remaining time.
    fn arm(&self, id: &ToastId) {
        let mut state = self.inner.state.borrow_mut();
        let Some(entry) = state.toasts.get_mut(id) else {
            return;
        };
        entry.cancel_timer();
        let generation = entry.generation;
        let delay = entry.countdown.remaining_at(Instant::now());

        let weak = Rc::downgrade(&self.inner);
        let id = id.clone();
        let timer = task::spawn_local(async move {
            time::sleep(delay).await;
            if let Some(manager) = Self::upgrade(&weak) {
                manager.expire(&id, generation);
            }
        });
        entry.timer = Some(timer.abort_handle());
    }

    fn expire(&self, id: &ToastId, generation: u64) {
        {
            let mut state = self.inner.state.borrow_mut();
            match state.toasts.get_mut(id) {
                Some(entry)
                    if entry.generation == generation && entry.state == ToastState::Showing =>
                {
                    entry.timer = None;
                }
                _ => return,
            }
        }
        tracing::debug!(%id, "toast timed out");
        self.begin_close(id);
    }

    /// Moves the toast to `Closing` and schedules its removal.
    ///
    /// Returns a receiver observing the toast's state, `None` for unknown ids.
    fn begin_close(&self, id: &ToastId) -> Option<watch::Receiver<ToastState>> {
        let (animation, closing) = {
            let mut state = self.inner.state.borrow_mut();
            let entry = state.toasts.get_mut(id)?;
            let closing = entry.closed.subscribe();
            if entry.state == ToastState::Closing {
                return Some(closing);
            }
            entry.cancel_timer();
            entry.set_state(ToastState::Closing);
            (entry.resolved.animation, closing)
        };

        tracing::debug!(%id, "closing toast");
        self.inner
            .host
            .borrow_mut()
            .transition(id, Transition::Exit(animation));

        let weak = Rc::downgrade(&self.inner);
        let id = id.clone();
        task::spawn_local(async move {
            time::sleep(EXIT_DELAY).await;
            if let Some(manager) = Self::upgrade(&weak) {
                manager.finish_close(&id);
            }
        });
        Some(closing)
    }

    fn finish_close(&self, id: &ToastId) {
        let Some(mut entry) = self.inner.state.borrow_mut().toasts.shift_remove(id) else {
            return;
        };
        self.inner.host.borrow_mut().remove(id);
        entry.set_state(ToastState::Closed);
        tracing::debug!(%id, "toast closed");
    }

    fn play_sound(&self, kind: ToastKind) {
        let Some(asset) = kind.sound() else {
            return;
        };
        let request = {
            let state = self.inner.state.borrow();
            SoundRequest {
                path: Path::new(&state.config.sound_dir).join(asset),
                volume: state.config.volume,
            }
        };
        if let Err(err) = self.inner.sound.borrow_mut().play(&request) {
            tracing::debug!(%err, path = %request.path.display(), "ignoring sound failure");
        }
    }

    fn upgrade(weak: &Weak<Inner<H>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Animation, error::SoundError, host::Placement, timeout::Timeout};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tokio::task::LocalSet;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Place(Placement),
        Create(ToastId, String),
        Update(ToastId, String, Option<String>),
        Transition(ToastId, Transition),
        Remove(ToastId),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl Recorder {
        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl Host for Recorder {
        fn place_container(&mut self, placement: &Placement) {
            self.0.borrow_mut().push(Call::Place(*placement));
        }

        fn create(&mut self, view: &ToastView) {
            self.0
                .borrow_mut()
                .push(Call::Create(view.id.clone(), view.message.clone()));
        }

        fn update(&mut self, view: &ToastView) {
            self.0.borrow_mut().push(Call::Update(
                view.id.clone(),
                view.message.clone(),
                view.description.clone(),
            ));
        }

        fn transition(&mut self, id: &ToastId, transition: Transition) {
            self.0
                .borrow_mut()
                .push(Call::Transition(id.clone(), transition));
        }

        fn remove(&mut self, id: &ToastId) {
            self.0.borrow_mut().push(Call::Remove(id.clone()));
        }
    }

    #[derive(Clone, Default)]
    struct Sounds(Rc<RefCell<Vec<PathBuf>>>);

    impl SoundPlayer for Sounds {
        fn play(&mut self, request: &SoundRequest) -> Result<(), SoundError> {
            self.0.borrow_mut().push(request.path.clone());
            Ok(())
        }
    }

    struct Broken;

    impl SoundPlayer for Broken {
        fn play(&mut self, request: &SoundRequest) -> Result<(), SoundError> {
            Err(SoundError::Playback(request.path.display().to_string()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn manager(config: Config) -> (ToastManager<Recorder>, Recorder) {
        let recorder = Recorder::default();
        let manager = ToastManager::new(recorder.clone(), config);
        recorder.take();
        (manager, recorder)
    }

    #[test]
    fn construction_places_container() {
        let recorder = Recorder::default();
        let config = Config::default();
        let _manager = ToastManager::new(recorder.clone(), config.clone());
        assert_eq!(recorder.take(), vec![Call::Place(config.placement())]);
    }

    #[test]
    fn try_new_rejects_zero_capacity() {
        let config = Config {
            max_toasts: 0,
            ..Config::default()
        };
        assert!(ToastManager::try_new(Recorder::default(), config.clone()).is_err());
        // the permissive constructor falls back instead
        let manager = ToastManager::new(Recorder::default(), config);
        assert_eq!(manager.config().max_toasts, crate::config::DEFAULT_MAX_TOASTS);
    }

    #[tokio::test(start_paused = true)]
    async fn show_creates_and_enters() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.animation(Animation::Fade);
                let id = manager.show("saved", &options);

                assert_eq!(
                    host.take(),
                    vec![
                        Call::Create(id.clone(), "saved".into()),
                        Call::Transition(id.clone(), Transition::Enter(Animation::Fade)),
                    ]
                );
                assert_eq!(manager.state(&id), Some(ToastState::Showing));
                assert_eq!(manager.count(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn auto_close_runs_full_lifecycle() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.timeout(Timeout::Milliseconds(1000));
                let id = manager.show("hello", &options);
                host.take();

                time::sleep(ms(999)).await;
                assert_eq!(manager.state(&id), Some(ToastState::Showing));

                time::sleep(ms(2)).await;
                assert_eq!(manager.state(&id), Some(ToastState::Closing));
                assert_eq!(manager.count(), 0);
                assert!(manager.exists(&id));

                time::sleep(EXIT_DELAY).await;
                assert!(!manager.exists(&id));
                assert_eq!(
                    host.take(),
                    vec![
                        Call::Transition(id.clone(), Transition::Exit(Animation::Slide)),
                        Call::Remove(id),
                    ]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn never_timeout_stays_until_closed() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.timeout(Timeout::Never);
                let id = manager.show("sticky", &options);

                time::sleep(Duration::from_secs(60)).await;
                assert_eq!(manager.state(&id), Some(ToastState::Showing));
                assert_eq!(manager.remaining(&id), None);

                manager.close(&id).await;
                assert!(!manager.exists(&id));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_resume_notify_host() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let id = manager.show("x", &ToastOptions::new());
                host.take();

                manager.pause(&id);
                manager.pause(&id);
                manager.resume(&id);
                manager.resume(&id);

                assert_eq!(
                    host.take(),
                    vec![
                        Call::Transition(id.clone(), Transition::Freeze),
                        Call::Transition(id, Transition::Run),
                    ]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn paused_toast_does_not_expire() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.timeout(Timeout::Milliseconds(500));
                let id = manager.show("x", &options);

                time::sleep(ms(100)).await;
                manager.pause(&id);
                assert_eq!(manager.remaining(&id), Some(ms(400)));

                time::sleep(Duration::from_secs(10)).await;
                assert_eq!(manager.state(&id), Some(ToastState::Paused));
                assert_eq!(manager.remaining(&id), Some(ms(400)));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn closing_toast_has_no_remaining_time() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let id = manager.show("x", &ToastOptions::new());
                time::sleep(ms(100)).await;
                assert_eq!(manager.remaining(&id), Some(ms(3900)));

                let closed = manager.close(&id);
                assert_eq!(manager.state(&id), Some(ToastState::Closing));
                assert_eq!(manager.remaining(&id), None);

                closed.await;
                assert_eq!(manager.remaining(&id), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn resume_without_auto_close_keeps_toast() {
        LocalSet::new()
            .run_until(async {
                let config = Config {
                    auto_close: false,
                    ..Config::default()
                };
                let (manager, _host) = manager(config);
                let id = manager.show("manual", &ToastOptions::new());

                manager.pause(&id);
                time::sleep(ms(100)).await;
                manager.resume(&id);
                time::sleep(Duration::from_secs(30)).await;

                assert_eq!(manager.state(&id), Some(ToastState::Showing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn manual_close_cancels_timer() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.timeout(Timeout::Milliseconds(300));
                let id = manager.show("x", &options);
                host.take();

                time::sleep(ms(100)).await;
                manager.close(&id).await;
                time::sleep(Duration::from_secs(1)).await;

                let exits = host
                    .take()
                    .into_iter()
                    .filter(|call| matches!(call, Call::Transition(_, Transition::Exit(_))))
                    .count();
                assert_eq!(exits, 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn closing_twice_waits_for_the_same_close() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let id = manager.show("x", &ToastOptions::new());
                host.take();

                let first = manager.close(&id);
                time::sleep(ms(150)).await;
                let started = Instant::now();
                manager.close(&id).await;
                assert_eq!(started.elapsed(), ms(50));
                first.await;

                // already gone
                manager.close(&id).await;
                assert_eq!(
                    host.take(),
                    vec![
                        Call::Transition(id.clone(), Transition::Exit(Animation::Slide)),
                        Call::Remove(id),
                    ]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_close_future_still_closes() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let id = manager.show("x", &ToastOptions::new());

                drop(manager.close(&id));
                time::sleep(EXIT_DELAY + ms(1)).await;
                assert!(!manager.exists(&id));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn update_replaces_content() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let id = manager.loading("uploading", &ToastOptions::new());
                host.take();

                let mut options = ToastOptions::new();
                options.kind(ToastKind::Success).description("3 files");
                manager.update(&id, "uploaded", &options);

                assert_eq!(
                    host.take(),
                    vec![Call::Update(
                        id.clone(),
                        "uploaded".into(),
                        Some("3 files".into())
                    )]
                );

                // unknown ids are ignored
                manager.update(&ToastId::from_seq(99), "nope", &ToastOptions::new());
                assert!(host.take().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn update_ignores_closing_toast() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let id = manager.show("x", &ToastOptions::new());
                let _closing = manager.close(&id);
                host.take();

                manager.update(&id, "late", &ToastOptions::new());
                assert!(host.take().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn hover_pauses_only_when_enabled() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let hover = manager.show("a", &ToastOptions::new());
                let mut options = ToastOptions::new();
                options.pause_on_hover(false);
                let fixed = manager.show("b", &options);

                manager.handle_event(HostEvent::PointerEnter(hover.clone()));
                manager.handle_event(HostEvent::PointerEnter(fixed.clone()));
                assert_eq!(manager.state(&hover), Some(ToastState::Paused));
                assert_eq!(manager.state(&fixed), Some(ToastState::Showing));

                manager.handle_event(HostEvent::PointerLeave(hover.clone()));
                assert_eq!(manager.state(&hover), Some(ToastState::Showing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn click_to_close_skips_controls() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.click_to_close(true);
                let id = manager.show("a", &options);
                let plain = manager.show("b", &ToastOptions::new());

                manager.handle_event(HostEvent::Clicked {
                    id: id.clone(),
                    on_control: true,
                });
                assert_eq!(manager.state(&id), Some(ToastState::Showing));

                manager.handle_event(HostEvent::Clicked {
                    id: plain.clone(),
                    on_control: false,
                });
                assert_eq!(manager.state(&plain), Some(ToastState::Showing));

                manager.handle_event(HostEvent::Clicked {
                    id: id.clone(),
                    on_control: false,
                });
                assert_eq!(manager.state(&id), Some(ToastState::Closing));

                manager.handle_event(HostEvent::CloseRequested(plain.clone()));
                assert_eq!(manager.state(&plain), Some(ToastState::Closing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn focus_and_visibility_pause_everything() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let a = manager.show("a", &ToastOptions::new());
                let b = manager.show("b", &ToastOptions::new());

                manager.handle_event(HostEvent::FocusLost);
                assert_eq!(manager.state(&a), Some(ToastState::Paused));
                assert_eq!(manager.state(&b), Some(ToastState::Paused));

                manager.handle_event(HostEvent::FocusGained);
                assert_eq!(manager.state(&a), Some(ToastState::Showing));

                manager.handle_event(HostEvent::VisibilityChanged { hidden: true });
                assert_eq!(manager.state(&b), Some(ToastState::Paused));
                manager.handle_event(HostEvent::VisibilityChanged { hidden: false });
                assert_eq!(manager.state(&b), Some(ToastState::Showing));

                manager.configure(|config| config.pause_when_inactive = false);
                manager.handle_event(HostEvent::FocusLost);
                assert_eq!(manager.state(&a), Some(ToastState::Showing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn configure_replaces_container_and_evicts() {
        LocalSet::new()
            .run_until(async {
                let (manager, host) = manager(Config::default());
                let ids: Vec<_> = (0..4)
                    .map(|i| manager.show(&format!("t{}", i), &ToastOptions::new()))
                    .collect();
                host.take();

                manager.configure(|config| {
                    config.max_toasts = 2;
                    config.position = crate::config::Position::BottomLeft;
                });

                let calls = host.take();
                assert_eq!(calls[0], Call::Place(manager.config().placement()));
                assert_eq!(manager.count(), 2);
                assert_eq!(manager.state(&ids[0]), Some(ToastState::Closing));
                assert_eq!(manager.state(&ids[1]), Some(ToastState::Closing));
                assert_eq!(manager.state(&ids[3]), Some(ToastState::Showing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn sounds_follow_kind_and_setting() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config {
                    play_sound: true,
                    ..Config::default()
                });
                let sounds = Sounds::default();
                manager.set_sound_player(sounds.clone());

                manager.error("boom", &ToastOptions::new());
                manager.loading("busy", &ToastOptions::new());
                let mut quiet = ToastOptions::new();
                quiet.play_sound(false);
                manager.success("ok", &quiet);

                assert_eq!(
                    *sounds.0.borrow(),
                    vec![PathBuf::from("/sounds/error.mp3")]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn sound_failures_are_ignored() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config {
                    play_sound: true,
                    ..Config::default()
                });
                manager.set_sound_player(Broken);

                let id = manager.warning("careful", &ToastOptions::new());
                assert_eq!(manager.state(&id), Some(ToastState::Showing));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn convenience_constructors_force_kind() {
        LocalSet::new()
            .run_until(async {
                let (manager, _host) = manager(Config::default());
                let mut options = ToastOptions::new();
                options.kind(ToastKind::Error);
                let id = manager.success("ok", &options);
                assert_eq!(manager.resolved(&id).map(|r| r.kind), Some(ToastKind::Success));
            })
            .await;
    }
}
