//! Deferred user-facing [`Notification`]s.

use std::{sync::Arc, time::Duration};

use derive_more::Display;
use tokio::{sync::watch, time};
use tracing as log;

/// Severity of a [`Notification`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Level {
    /// Operation succeeded.
    #[display("success")]
    Success,

    /// Operation failed.
    #[display("failure")]
    Failure,
}

/// User-facing message about an operation outcome.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("[{level}] {message}")]
pub struct Notification {
    /// [`Level`] of this [`Notification`].
    pub level: Level,

    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Creates a new [`Level::Success`] [`Notification`].
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Creates a new [`Level::Failure`] [`Notification`].
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: Level::Failure,
            message: message.into(),
        }
    }
}

/// Moment a scheduled [`Notification`] becomes visible at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// After the provided delay elapses.
    Delay(Duration),

    /// Once the renderer reports the pending state change as committed via
    /// [`Scheduler::commit()`].
    Committed,
}

impl Trigger {
    /// Delay of the default [`Trigger`].
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);
}

impl Default for Trigger {
    fn default() -> Self {
        Self::Delay(Self::DEFAULT_DELAY)
    }
}

/// State of the single notification slot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Toast {
    /// Number of [`Notification`]s scheduled so far.
    generation: u64,

    /// Last scheduled [`Notification`].
    payload: Option<Notification>,

    /// Whether the [`Toast::payload`] is shown.
    visible: bool,
}

impl Toast {
    /// Returns the generation of the last scheduled [`Notification`].
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the last scheduled [`Notification`], if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Notification> {
        self.payload.as_ref()
    }

    /// Indicates whether the [`Notification`] is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the shown [`Notification`], if any.
    #[must_use]
    pub fn shown(&self) -> Option<&Notification> {
        self.payload.as_ref().filter(|_| self.visible)
    }
}

/// Scheduler deferring [`Notification`]s until the state change they report
/// has been rendered.
///
/// Holds a single slot: scheduling a new [`Notification`] supersedes the
/// previous one, whether it was shown already or not.
#[derive(Clone, Debug)]
pub struct Scheduler {
    /// [`Trigger`] of the scheduled [`Notification`]s.
    trigger: Trigger,

    /// Sender of the [`Toast`] state.
    state: Arc<watch::Sender<Toast>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Trigger::default())
    }
}

impl Scheduler {
    /// Creates a new [`Scheduler`] with the provided [`Trigger`].
    #[must_use]
    pub fn new(trigger: Trigger) -> Self {
        let (state, _) = watch::channel(Toast::default());
        Self {
            trigger,
            state: Arc::new(state),
        }
    }

    /// Returns the [`Trigger`] of this [`Scheduler`].
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Schedules the provided [`Notification`], hiding the current one.
    ///
    /// Returns the generation to pass into [`Scheduler::commit()`].
    ///
    /// # Panics
    ///
    /// With [`Trigger::Delay`], if called outside of a [Tokio] runtime.
    ///
    /// [Tokio]: https://tokio.rs
    pub fn schedule(&self, notification: Notification) -> u64 {
        log::debug!("scheduling notification: {notification}");

        let mut generation = 0;
        self.state.send_modify(|toast| {
            toast.generation += 1;
            toast.payload = Some(notification);
            toast.visible = false;
            generation = toast.generation;
        });

        if let Trigger::Delay(delay) = self.trigger {
            let state = Arc::clone(&self.state);
            drop(tokio::spawn(async move {
                time::sleep(delay).await;
                _ = show(&state, generation);
            }));
        }

        generation
    }

    /// Shows the [`Notification`] of the provided `generation`, once the
    /// state change it reports has been rendered.
    ///
    /// Returns `false` if the `generation` is superseded by a newer
    /// [`Notification`] or is shown already.
    pub fn commit(&self, generation: u64) -> bool {
        show(&self.state, generation)
    }

    /// Hides and forgets the current [`Notification`].
    pub fn dismiss(&self) {
        _ = self.state.send_if_modified(|toast| {
            toast.visible = false;
            toast.payload.take().is_some()
        });
    }

    /// Returns the current [`Toast`] state.
    #[must_use]
    pub fn toast(&self) -> Toast {
        self.state.borrow().clone()
    }

    /// Subscribes to the [`Toast`] state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Toast> {
        self.state.subscribe()
    }
}

/// Makes the [`Notification`] of the provided `generation` visible, unless it
/// has been superseded.
fn show(state: &watch::Sender<Toast>, generation: u64) -> bool {
    state.send_if_modified(|toast| {
        let pending = toast.generation == generation
            && toast.payload.is_some()
            && !toast.visible;
        if pending {
            toast.visible = true;
        }
        pending
    })
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::time;

    use super::{Level, Notification, Scheduler, Trigger};

    #[tokio::test(start_paused = true)]
    async fn shows_after_delay() {
        let scheduler = Scheduler::default();

        _ = scheduler.schedule(Notification::success("Résidence créée"));
        assert!(!scheduler.toast().is_visible());

        time::sleep(Duration::from_millis(60)).await;

        let toast = scheduler.toast();
        assert!(toast.is_visible());
        assert_eq!(toast.shown().map(|n| n.level), Some(Level::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn latest_supersedes_pending() {
        let delay = Duration::from_millis(50);
        let scheduler = Scheduler::new(Trigger::Delay(delay));

        _ = scheduler.schedule(Notification::success("first"));
        time::sleep(Duration::from_millis(20)).await;
        _ = scheduler.schedule(Notification::failure("second"));
        time::sleep(Duration::from_millis(40)).await;

        // First timer fired already, but is superseded.
        assert!(!scheduler.toast().is_visible());

        time::sleep(Duration::from_millis(20)).await;

        assert_eq!(
            scheduler.toast().shown(),
            Some(&Notification::failure("second")),
        );
    }

    #[test]
    fn committed_trigger_waits_for_commit() {
        let scheduler = Scheduler::new(Trigger::Committed);

        let first = scheduler.schedule(Notification::success("first"));
        let second = scheduler.schedule(Notification::success("second"));
        assert!(!scheduler.toast().is_visible());

        assert!(!scheduler.commit(first));
        assert!(!scheduler.toast().is_visible());

        assert!(scheduler.commit(second));
        assert!(!scheduler.commit(second));
        assert_eq!(
            scheduler.toast().shown(),
            Some(&Notification::success("second")),
        );
    }

    #[test]
    fn dismisses_shown_notification() {
        let scheduler = Scheduler::new(Trigger::Committed);
        let generation = scheduler.schedule(Notification::failure("oops"));
        assert!(scheduler.commit(generation));

        scheduler.dismiss();

        let toast = scheduler.toast();
        assert!(!toast.is_visible());
        assert_eq!(toast.shown(), None);
        assert_eq!(toast.generation(), generation);
        assert!(!scheduler.commit(generation));
    }
}
