//! [`Carousel`] of [`Residence`] images.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::watch;

use crate::{
    domain::{
        residence::{self, Image},
        Residence,
    },
    store::Snapshot,
};

/// Per-[`Residence`] cursors over their [`Image`]s.
///
/// Cursors are reset to the first [`Image`] whenever the observed collection
/// is replaced by a new one, and are kept while it stays the same.
#[derive(Clone, Debug, Default)]
pub struct Carousel {
    /// Observed collection of [`Residence`]s.
    residences: Arc<Vec<Residence>>,

    /// Cursor of every observed [`Residence`].
    cursors: HashMap<residence::Id, usize>,
}

impl Carousel {
    /// Creates a new [`Carousel`] over the provided [`Residence`]s.
    #[must_use]
    pub fn new(residences: Arc<Vec<Residence>>) -> Self {
        let mut this = Self::default();
        this.reset(residences);
        this
    }

    /// Synchronizes this [`Carousel`] with the provided collection.
    ///
    /// Returns `true` if the collection has changed, so the cursors were
    /// reset.
    pub fn sync(&mut self, residences: &Arc<Vec<Residence>>) -> bool {
        if Arc::ptr_eq(&self.residences, residences) {
            return false;
        }
        self.reset(Arc::clone(residences));
        true
    }

    /// Waits for the next [`Snapshot`] and synchronizes with its collection.
    ///
    /// Returns `false` once the [`Store`] is gone.
    ///
    /// [`Store`]: crate::Store
    pub async fn follow(
        &mut self,
        changes: &mut watch::Receiver<Snapshot>,
    ) -> bool {
        if changes.changed().await.is_err() {
            return false;
        }
        let residences = changes.borrow_and_update().residences();
        _ = self.sync(&residences);
        true
    }

    /// Returns the cursor of the [`Residence`] with the provided ID.
    ///
    /// Unknown [`Residence`]s are at `0`.
    #[must_use]
    pub fn cursor(&self, id: residence::Id) -> usize {
        self.cursors.get(&id).copied().unwrap_or_default()
    }

    /// Moves the cursor of the [`Residence`] with the provided ID to its next
    /// [`Image`], wrapping around after the last one.
    ///
    /// Returns the new cursor.
    pub fn advance(&mut self, id: residence::Id) -> usize {
        self.step(id, |cursor, count| (cursor + 1) % count)
    }

    /// Moves the cursor of the [`Residence`] with the provided ID to its
    /// previous [`Image`], wrapping around before the first one.
    ///
    /// Returns the new cursor.
    pub fn retreat(&mut self, id: residence::Id) -> usize {
        self.step(id, |cursor, count| (cursor + count - 1) % count)
    }

    /// Returns the [`Image`] under the cursor of the [`Residence`] with the
    /// provided ID.
    #[must_use]
    pub fn current_image(&self, id: residence::Id) -> Option<&Image> {
        self.find(id)?.images.get(self.cursor(id))
    }

    /// Replaces the observed collection, resetting every cursor.
    fn reset(&mut self, residences: Arc<Vec<Residence>>) {
        self.cursors = residences.iter().map(|r| (r.id, 0)).collect();
        self.residences = residences;
    }

    /// Finds the observed [`Residence`] with the provided ID.
    fn find(&self, id: residence::Id) -> Option<&Residence> {
        self.residences.iter().find(|r| r.id == id)
    }

    /// Moves the cursor of the [`Residence`] with the provided ID with the
    /// provided function of the cursor and [`Image`]s count.
    ///
    /// No-op for unknown [`Residence`]s and ones without [`Image`]s.
    fn step(
        &mut self,
        id: residence::Id,
        next: impl FnOnce(usize, usize) -> usize,
    ) -> usize {
        let count = self.find(id).map_or(0, |r| r.images.len());
        if count == 0 {
            return self.cursor(id);
        }
        let cursor = self.cursors.entry(id).or_default();
        *cursor = next(*cursor % count, count);
        *cursor
    }
}
