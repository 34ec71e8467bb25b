//! [`Query`] of the whole [`Residence`] collection.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Residence,
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Query;

/// Queries all the [`Residence`]s, replacing the local collection with them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Residences;

impl<R> Query<Residences> for Service<R>
where
    R: Remote<
        Select<By<Vec<Residence>, ()>>,
        Ok = Vec<Residence>,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = Vec<Residence>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Residences) -> Result<Self::Ok, Self::Err> {
        self.orchestrate(
            Operation::FetchAll,
            self.remote().execute(Select(By::new(()))),
            |all| Reconciliation::ReplaceAll(all.clone()),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`Residences`] [`Query`] execution.
pub type ExecutionError = crate::ExecutionError;
