//! [`Command`] for updating an existing [`Residence`].

use common::operations::Update;
use tracerr::Traced;

use crate::{
    domain::{residence, Draft, Residence},
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Residence`].
#[derive(Clone, Debug)]
pub struct UpdateResidence {
    /// ID of the [`Residence`] to update.
    pub id: residence::Id,

    /// [`Draft`] of the changes.
    pub draft: Draft,
}

impl<R> Command<UpdateResidence> for Service<R>
where
    R: Remote<
        Update<(residence::Id, Draft)>,
        Ok = Residence,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = Residence;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateResidence,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateResidence { id, draft } = cmd;

        self.orchestrate(
            Operation::Update,
            self.remote().execute(Update((id, draft))),
            |updated| Reconciliation::Replace(updated.clone()),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateResidence`] [`Command`] execution.
pub type ExecutionError = crate::ExecutionError;
