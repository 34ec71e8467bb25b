//! Lifecycle of remote [`Operation`]s orchestrated by a [`Service`].

use std::{future::Future, time::Duration};

use derive_more::{Display, Error, From};
use tokio::time;
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::remote,
    notification::Notification,
    store::{OperationKind, Reconciliation},
    Service,
};

/// Remote operation orchestrated by a [`Service`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Operation {
    /// Fetching all the residences.
    #[display("fetch all")]
    FetchAll,

    /// Fetching a single residence.
    #[display("fetch one")]
    FetchOne,

    /// Creating a residence.
    #[display("create")]
    Create,

    /// Updating a residence.
    #[display("update")]
    Update,

    /// Soft-deleting a residence.
    #[display("delete")]
    Delete,

    /// Restoring a soft-deleted residence.
    #[display("restore")]
    Restore,
}

impl Operation {
    /// Returns the [`OperationKind`] whose busy flag this [`Operation`]
    /// drives.
    #[must_use]
    pub fn kind(self) -> OperationKind {
        match self {
            Self::FetchAll | Self::FetchOne => OperationKind::Loading,
            Self::Create | Self::Update => OperationKind::Saving,
            Self::Delete | Self::Restore => OperationKind::Deleting,
        }
    }

    /// Returns the message notified once this [`Operation`] succeeds.
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::FetchAll => "Liste des résidences chargée",
            Self::FetchOne => "Résidence chargée",
            Self::Create => "Résidence créée avec succès",
            Self::Update => "Résidence mise à jour avec succès",
            Self::Delete => "Résidence supprimée avec succès",
            Self::Restore => "Résidence restaurée avec succès",
        }
    }

    /// Returns the message notified once this [`Operation`] fails.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::FetchAll => "Erreur lors du chargement des résidences",
            Self::FetchOne => "Erreur lors du chargement de la résidence",
            Self::Create => "Erreur lors de la création de la résidence",
            Self::Update => "Erreur lors de la mise à jour de la résidence",
            Self::Delete => "Erreur lors de la suppression de la résidence",
            Self::Restore => "Erreur lors de la restauration de la résidence",
        }
    }
}

/// Error of an orchestrated [`Operation`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Remote service failed.
    #[display("remote operation failed: {_0}")]
    Remote(remote::Error),

    /// Remote service didn't respond in time.
    #[display("remote operation timed out after {_0:?}")]
    #[from(ignore)]
    TimedOut(#[error(not(source))] Duration),
}

impl<R> Service<R> {
    /// Runs the provided remote `call` as the given [`Operation`].
    ///
    /// Raises the busy flag of the [`Operation`] for the whole `call`, then
    /// either applies the [`Reconciliation`] built out of its result, or
    /// records its error. Either way a [`Notification`] is scheduled.
    pub(crate) async fn orchestrate<T>(
        &self,
        op: Operation,
        call: impl Future<Output = Result<T, Traced<remote::Error>>>,
        reconcile: impl FnOnce(&T) -> Reconciliation,
    ) -> Result<T, Traced<ExecutionError>> {
        let kind = op.kind();
        log::debug!("`{op}` operation started");
        self.store().start(kind);

        let res = match self.config().timeout {
            Some(limit) => match time::timeout(limit, call).await {
                Ok(res) => {
                    res.map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
                }
                Err(_) => Err(tracerr::new!(ExecutionError::TimedOut(limit))),
            },
            None => call
                .await
                .map_err(tracerr::map_from_and_wrap!(=> ExecutionError)),
        };

        match res {
            Ok(value) => {
                self.store().succeed(kind, reconcile(&value));
                log::info!("`{op}` operation succeeded");
                _ = self
                    .notifications()
                    .schedule(Notification::success(op.success_message()));
                Ok(value)
            }
            Err(e) => {
                let failure = op.failure_message();
                log::error!("`{op}` operation failed: {e}");
                self.store().fail(kind, format!("{failure}: {}", e.as_ref()));
                _ = self
                    .notifications()
                    .schedule(Notification::failure(failure));
                Err(e)
            }
        }
    }
}
