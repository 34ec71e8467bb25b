//! [`Form`] editing session of a [`Residence`].

use std::path::Path;

use tracerr::Traced;
use tracing as log;

use crate::{
    command::{save_residence, SaveResidence},
    domain::{Draft, EditMode, Residence},
    images,
    validation::FormErrors,
    Command, Service,
};

/// Editing session of a single [`Draft`].
///
/// At most one [`Draft`] is edited at a time: opening a new one discards the
/// previous one.
#[derive(Clone, Debug, Default)]
pub struct Form {
    /// Edited [`Draft`] along with its [`EditMode`], if any.
    session: Option<(Draft, EditMode)>,

    /// [`FormErrors`] of the last submission.
    errors: FormErrors,
}

impl Form {
    /// Opens an empty [`Draft`] of a new [`Residence`].
    pub fn open_create(&mut self) {
        self.open(Draft::default(), EditMode::Create);
    }

    /// Opens a [`Draft`] prefilled with the provided [`Residence`].
    pub fn open_update(&mut self, residence: &Residence) {
        self.open(Draft::from(residence), EditMode::Update(residence.id));
    }

    /// Discards the edited [`Draft`], if any.
    pub fn cancel(&mut self) {
        self.session = None;
        self.errors = FormErrors::default();
    }

    /// Indicates whether a [`Draft`] is being edited.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the [`EditMode`] of the edited [`Draft`], if any.
    #[must_use]
    pub fn mode(&self) -> Option<EditMode> {
        self.session.as_ref().map(|(_, mode)| *mode)
    }

    /// Returns the edited [`Draft`], if any.
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        self.session.as_ref().map(|(draft, _)| draft)
    }

    /// Returns the edited [`Draft`] for modification, if any.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.session.as_mut().map(|(draft, _)| draft)
    }

    /// Returns [`FormErrors`] of the last submission.
    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Ingests the image files at the provided `paths` and attaches them to
    /// the edited [`Draft`] at once.
    ///
    /// Returns the number of attached images, which is `0` if no [`Draft`]
    /// is being edited.
    pub async fn attach<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> usize {
        if self.session.is_none() {
            return 0;
        }
        let ingested = images::ingest(paths).await;
        let count = ingested.len();
        if let Some(draft) = self.draft_mut() {
            draft.attach(ingested);
        }
        count
    }

    /// Submits the edited [`Draft`] via the provided [`Service`].
    ///
    /// Closes this [`Form`] and returns `true` on success. Otherwise, keeps
    /// the [`Draft`] open, so it may be fixed and submitted again, exposing
    /// its [`FormErrors`] if it was rejected as invalid.
    pub async fn submit<R>(&mut self, service: &Service<R>) -> bool
    where
        Service<R>: Command<
            SaveResidence,
            Ok = Residence,
            Err = Traced<save_residence::ExecutionError>,
        >,
    {
        let Some((draft, mode)) = self.session.clone() else {
            return false;
        };

        match service.execute(SaveResidence { draft, mode }).await {
            Ok(saved) => {
                log::debug!("`Residence({})` saved", saved.id);
                self.cancel();
                true
            }
            Err(e) => {
                self.errors =
                    e.as_ref().form_errors().cloned().unwrap_or_default();
                false
            }
        }
    }

    /// Opens the provided [`Draft`], discarding the previous one.
    fn open(&mut self, draft: Draft, mode: EditMode) {
        self.session = Some((draft, mode));
        self.errors = FormErrors::default();
    }
}
