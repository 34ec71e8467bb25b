//! [`Command`] for soft-deleting a [`Residence`].

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{residence, Residence},
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Command;

/// [`Command`] for soft-deleting a [`Residence`].
///
/// The deleted [`Residence`] is dropped from the local collection, while the
/// remote service keeps it inactive, so it may be restored later with a
/// [`RestoreResidence`].
///
/// [`RestoreResidence`]: super::RestoreResidence
#[derive(Clone, Copy, Debug)]
pub struct DeleteResidence {
    /// ID of the [`Residence`] to delete.
    pub id: residence::Id,
}

impl<R> Command<DeleteResidence> for Service<R>
where
    R: Remote<
        Delete<By<Residence, residence::Id>>,
        Ok = (),
        Err = Traced<remote::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteResidence,
    ) -> Result<Self::Ok, Self::Err> {
        let DeleteResidence { id } = cmd;

        self.orchestrate(
            Operation::Delete,
            self.remote().execute(Delete(By::new(id))),
            |_| Reconciliation::Remove(id),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteResidence`] [`Command`] execution.
pub type ExecutionError = crate::ExecutionError;

#[cfg(test)]
mod spec {
    use crate::{
        domain::residence::{Id, Status},
        fixture::{self, Fake},
        Command as _,
    };

    use super::DeleteResidence;

    #[tokio::test]
    async fn removes_locally_and_deactivates_remotely() {
        let fake = Fake::with(vec![
            fixture::residence(1, "Alpha"),
            fixture::residence(2, "Beta"),
        ]);
        let svc = fixture::service(fake.clone());
        _ = svc.execute(crate::query::Residences).await.unwrap();

        svc.execute(DeleteResidence { id: Id::from(1) }).await.unwrap();

        let ids = svc
            .store()
            .residences()
            .iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [Id::from(2)]);
        assert_eq!(fake.residences()[0].status, Status::Inactive);
        assert!(!svc.store().flags().is_deleting);
    }

    #[tokio::test]
    async fn failure_keeps_record() {
        let fake = Fake::with(vec![fixture::residence(1, "Alpha")]);
        let svc = fixture::service(fake.clone());
        _ = svc.execute(crate::query::Residences).await.unwrap();
        fake.fail();

        let res = svc.execute(DeleteResidence { id: Id::from(1) }).await;

        assert!(res.is_err());
        assert_eq!(svc.store().residences().len(), 1);
        assert!(!svc.store().flags().is_deleting);
        assert!(svc
            .store()
            .error()
            .is_some_and(|e| e.starts_with("Erreur lors de la suppression")));
    }
}
