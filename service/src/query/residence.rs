//! [`Query`] of a single [`Residence`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{residence, Residence},
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Query;

/// Queries a [`Residence`] by its [`residence::Id`], making it the current
/// one.
///
/// The local collection is left untouched.
#[derive(Clone, Copy, Debug)]
pub struct ResidenceById(pub residence::Id);

impl<R> Query<ResidenceById> for Service<R>
where
    R: Remote<
        Select<By<Residence, residence::Id>>,
        Ok = Residence,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = Residence;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ResidenceById(id): ResidenceById,
    ) -> Result<Self::Ok, Self::Err> {
        self.orchestrate(
            Operation::FetchOne,
            self.remote().execute(Select(By::new(id))),
            |found| Reconciliation::Current(found.clone()),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`ResidenceById`] [`Query`] execution.
pub type ExecutionError = crate::ExecutionError;
