//! [`Store`] of the [`Residence`] collection and its operation state.

use std::sync::Arc;

use derive_more::Display;
use tokio::sync::watch;

use crate::domain::{residence, Residence};

/// Kind of an operation tracked by its own busy flag.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum OperationKind {
    /// Fetching [`Residence`]s.
    #[display("loading")]
    Loading,

    /// Creating or updating a [`Residence`].
    #[display("saving")]
    Saving,

    /// Deleting or restoring a [`Residence`].
    #[display("deleting")]
    Deleting,
}

/// Busy flags of every [`OperationKind`].
///
/// Flags are independent: an operation of one kind never touches the flag of
/// another kind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OperationFlags {
    /// Whether [`OperationKind::Loading`] is in flight.
    pub is_loading: bool,

    /// Whether [`OperationKind::Saving`] is in flight.
    pub is_saving: bool,

    /// Whether [`OperationKind::Deleting`] is in flight.
    pub is_deleting: bool,
}

impl OperationFlags {
    /// Returns the flag of the provided [`OperationKind`].
    #[must_use]
    pub fn get(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Loading => self.is_loading,
            OperationKind::Saving => self.is_saving,
            OperationKind::Deleting => self.is_deleting,
        }
    }

    /// Sets the flag of the provided [`OperationKind`].
    fn set(&mut self, kind: OperationKind, value: bool) {
        let flag = match kind {
            OperationKind::Loading => &mut self.is_loading,
            OperationKind::Saving => &mut self.is_saving,
            OperationKind::Deleting => &mut self.is_deleting,
        };
        *flag = value;
    }

    /// Indicates whether any operation is in flight.
    #[must_use]
    pub fn any(&self) -> bool {
        self.is_loading || self.is_saving || self.is_deleting
    }
}

/// State of a [`Store`] at some point in time.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// Collection of [`Residence`]s.
    residences: Arc<Vec<Residence>>,

    /// Last [`Residence`] fetched on its own.
    current: Option<Residence>,

    /// Message of the last failed operation.
    error: Option<String>,

    /// Busy [`OperationFlags`].
    flags: OperationFlags,
}

impl Snapshot {
    /// Returns the collection of [`Residence`]s.
    ///
    /// The returned reference changes whenever the collection does.
    #[must_use]
    pub fn residences(&self) -> Arc<Vec<Residence>> {
        Arc::clone(&self.residences)
    }

    /// Returns the last [`Residence`] fetched on its own, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Residence> {
        self.current.as_ref()
    }

    /// Returns the message of the last failed operation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the busy [`OperationFlags`].
    #[must_use]
    pub fn flags(&self) -> OperationFlags {
        self.flags
    }
}

/// Change applied to a [`Store`] once a remote operation succeeds.
#[derive(Clone, Debug)]
pub(crate) enum Reconciliation {
    /// Replaces the whole collection.
    ReplaceAll(Vec<Residence>),

    /// Sets the current [`Residence`].
    Current(Residence),

    /// Appends a [`Residence`] to the collection.
    Append(Residence),

    /// Replaces the [`Residence`] with the same ID, if present.
    Replace(Residence),

    /// Removes the [`Residence`] with the provided ID, if present.
    Remove(residence::Id),
}

impl Reconciliation {
    /// Applies this [`Reconciliation`] to the provided [`Snapshot`].
    ///
    /// The collection is only ever swapped for a new one, and is left
    /// untouched when nothing matches.
    fn apply(self, snapshot: &mut Snapshot) {
        let list = &snapshot.residences;
        let replacement = match self {
            Self::ReplaceAll(all) => Some(all),
            Self::Current(residence) => {
                snapshot.current = Some(residence);
                None
            }
            Self::Append(residence) => {
                let mut all = Vec::with_capacity(list.len() + 1);
                all.extend(list.iter().cloned());
                all.push(residence);
                Some(all)
            }
            Self::Replace(residence) => {
                list.iter().position(|r| r.id == residence.id).map(|pos| {
                    let mut all = Vec::clone(list);
                    all[pos] = residence;
                    all
                })
            }
            Self::Remove(id) => list.iter().any(|r| r.id == id).then(|| {
                list.iter().filter(|r| r.id != id).cloned().collect()
            }),
        };
        if let Some(all) = replacement {
            snapshot.residences = Arc::new(all);
        }
    }
}

/// Store of the [`Residence`] collection, owning it exclusively.
///
/// Readers observe it via [`Snapshot`]s, while mutations are only performed
/// by the orchestrated operations of a [`Service`], besides the explicit
/// [`Store::clear_error()`] and [`Store::clear_current_residence()`] resets.
///
/// [`Service`]: crate::Service
#[derive(Clone, Debug)]
pub struct Store {
    /// Sender of the [`Snapshot`]s.
    state: Arc<watch::Sender<Snapshot>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a new empty [`Store`].
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Returns the current [`Snapshot`] of this [`Store`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Returns the current collection of [`Residence`]s.
    #[must_use]
    pub fn residences(&self) -> Arc<Vec<Residence>> {
        self.state.borrow().residences()
    }

    /// Returns the last [`Residence`] fetched on its own, if any.
    #[must_use]
    pub fn current(&self) -> Option<Residence> {
        self.state.borrow().current.clone()
    }

    /// Returns the message of the last failed operation, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Returns the current busy [`OperationFlags`].
    #[must_use]
    pub fn flags(&self) -> OperationFlags {
        self.state.borrow().flags
    }

    /// Subscribes to the changes of this [`Store`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Forgets the message of the last failed operation.
    pub fn clear_error(&self) {
        _ = self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Forgets the last [`Residence`] fetched on its own.
    pub fn clear_current_residence(&self) {
        _ = self.state.send_if_modified(|s| s.current.take().is_some());
    }

    /// Marks an operation of the provided [`OperationKind`] as started.
    pub(crate) fn start(&self, kind: OperationKind) {
        self.state.send_modify(|s| {
            s.flags.set(kind, true);
            s.error = None;
        });
    }

    /// Marks an operation of the provided [`OperationKind`] as succeeded,
    /// applying its [`Reconciliation`].
    pub(crate) fn succeed(&self, kind: OperationKind, change: Reconciliation) {
        self.state.send_modify(|s| {
            s.flags.set(kind, false);
            change.apply(s);
        });
    }

    /// Marks an operation of the provided [`OperationKind`] as failed with the
    /// provided `message`.
    pub(crate) fn fail(&self, kind: OperationKind, message: String) {
        self.state.send_modify(|s| {
            s.flags.set(kind, false);
            s.error = Some(message);
        });
    }
}
