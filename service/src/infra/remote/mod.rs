//! [`Remote`]-related implementations.
//!
//! The remote service is consumed through the following operations, each
//! implemented by [`Remote`] backends:
//! - [`Select`]`<`[`By`]`<Vec<`[`Residence`]`>, ()>>` lists every record;
//! - [`Select`]`<`[`By`]`<`[`Residence`]`, `[`residence::Id`]`>>` fetches one;
//! - [`Insert`]`<`[`Draft`]`>` creates a record;
//! - [`Update`]`<(`[`residence::Id`]`, `[`Draft`]`)>` updates a record;
//! - [`Delete`]`<`[`By`]`<`[`Residence`]`, `[`residence::Id`]`>>` soft-deletes
//!   a record;
//! - [`Restore`]`<`[`By`]`<`[`Residence`]`, `[`residence::Id`]`>>` restores a
//!   soft-deleted record.

#[cfg(feature = "http")]
pub mod http;

#[cfg(doc)]
use common::operations::{By, Delete, Insert, Restore, Select, Update};
use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use crate::domain::{residence, Draft, Residence};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote service operation.
pub use common::Handler as Remote;

/// [`Remote`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),

    /// Remote service cannot process operations at the moment.
    #[display("remote service is unavailable: {_0}")]
    #[from(ignore)]
    Unavailable(#[error(not(source))] String),
}
