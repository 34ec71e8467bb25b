//! [`Command`] definition.

pub mod create_residence;
pub mod delete_residence;
pub mod restore_residence;
pub mod save_residence;
pub mod update_residence;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_residence::CreateResidence, delete_residence::DeleteResidence,
    restore_residence::RestoreResidence, save_residence::SaveResidence,
    update_residence::UpdateResidence,
};
