//! [`Command`] for restoring a soft-deleted [`Residence`].

use common::operations::{By, Restore};
use tracerr::Traced;

use crate::{
    domain::{residence, Residence},
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Command;

/// [`Command`] for restoring a soft-deleted [`Residence`].
#[derive(Clone, Copy, Debug)]
pub struct RestoreResidence {
    /// ID of the [`Residence`] to restore.
    pub id: residence::Id,
}

impl<R> Command<RestoreResidence> for Service<R>
where
    R: Remote<
        Restore<By<Residence, residence::Id>>,
        Ok = Residence,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = Residence;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RestoreResidence,
    ) -> Result<Self::Ok, Self::Err> {
        let RestoreResidence { id } = cmd;

        self.orchestrate(
            Operation::Restore,
            self.remote().execute(Restore(By::new(id))),
            |restored| Reconciliation::Replace(restored.clone()),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`RestoreResidence`] [`Command`] execution.
pub type ExecutionError = crate::ExecutionError;
