//! [`Command`] for creating a new [`Residence`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{Draft, Residence},
    infra::{remote, Remote},
    lifecycle::Operation,
    store::Reconciliation,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Residence`].
#[derive(Clone, Debug)]
pub struct CreateResidence {
    /// [`Draft`] of a new [`Residence`].
    pub draft: Draft,
}

impl<R> Command<CreateResidence> for Service<R>
where
    R: Remote<Insert<Draft>, Ok = Residence, Err = Traced<remote::Error>>,
{
    type Ok = Residence;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateResidence,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateResidence { draft } = cmd;

        self.orchestrate(
            Operation::Create,
            self.remote().execute(Insert(draft)),
            |created| Reconciliation::Append(created.clone()),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateResidence`] [`Command`] execution.
pub type ExecutionError = crate::ExecutionError;

#[cfg(test)]
mod spec {
    use crate::{
        fixture::{self, Fake},
        Command as _,
    };

    use super::CreateResidence;

    #[tokio::test]
    async fn appends_created_residence() {
        let fake = Fake::with(vec![fixture::residence(1, "Alpha")]);
        let svc = fixture::service(fake.clone());

        let created = svc
            .execute(CreateResidence {
                draft: fixture::draft("Beta"),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Beta");
        let all = svc.store().residences();
        assert_eq!(all.last(), Some(&created));
        assert!(!svc.store().flags().is_saving);
        assert_eq!(fake.residences().len(), 2);
    }

    #[tokio::test]
    async fn keeps_collection_on_failure() {
        let fake = Fake::default();
        fake.fail();
        let svc = fixture::service(fake);
        let before = svc.store().residences();

        let res = svc
            .execute(CreateResidence {
                draft: fixture::draft("Beta"),
            })
            .await;

        assert!(res.is_err());
        assert!(std::sync::Arc::ptr_eq(&before, &svc.store().residences()));
        assert!(!svc.store().flags().is_saving);
        assert_eq!(
            svc.store().error().as_deref(),
            Some(
                "Erreur lors de la création de la résidence: \
                 remote operation failed: \
                 remote service is unavailable: connection refused",
            ),
        );
    }
}
