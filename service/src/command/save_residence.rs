//! [`Command`] for saving a [`Draft`] of a [`Residence`].

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{Draft, EditMode, Residence},
    validation::{self, FormErrors},
    Service,
};

use super::{Command, CreateResidence, UpdateResidence};

/// [`Command`] for saving a [`Draft`] of a [`Residence`].
///
/// Validates the [`Draft`] first, and only reaches the remote service if it
/// is valid, either creating or updating a [`Residence`] depending on the
/// [`EditMode`].
#[derive(Clone, Debug)]
pub struct SaveResidence {
    /// [`Draft`] to save.
    pub draft: Draft,

    /// [`EditMode`] of the [`Draft`].
    pub mode: EditMode,
}

impl<R> Command<SaveResidence> for Service<R>
where
    Self: Command<
            CreateResidence,
            Ok = Residence,
            Err = Traced<crate::ExecutionError>,
        > + Command<
            UpdateResidence,
            Ok = Residence,
            Err = Traced<crate::ExecutionError>,
        >,
{
    type Ok = Residence;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveResidence) -> Result<Self::Ok, Self::Err> {
        let SaveResidence { draft, mode } = cmd;

        let errors = validation::validate(&draft, self.config().rules);
        if !errors.is_empty() {
            log::debug!("rejecting invalid `Draft`: {errors}");
            return Err(tracerr::new!(ExecutionError::Invalid(errors)));
        }

        match mode {
            EditMode::Create => self
                .execute(CreateResidence { draft })
                .await
                .map_err(tracerr::map_from_and_wrap!()),
            EditMode::Update(id) => self
                .execute(UpdateResidence { id, draft })
                .await
                .map_err(tracerr::map_from_and_wrap!()),
        }
    }
}

/// Error of [`SaveResidence`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Draft`] is invalid.
    #[display("invalid `Draft`: {_0}")]
    Invalid(FormErrors),

    /// Saving the valid [`Draft`] failed.
    #[display("{_0}")]
    Execution(crate::ExecutionError),
}

impl ExecutionError {
    /// Returns [`FormErrors`] if the [`Draft`] has been rejected as invalid.
    #[must_use]
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Execution(_) => None,
        }
    }
}
