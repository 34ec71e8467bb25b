//! [`Query`] definition.

pub mod residence;
pub mod residences;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

pub use self::{residence::ResidenceById, residences::Residences};
