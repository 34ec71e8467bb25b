//! Service coordinates the lifecycle of residences kept by a remote service.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod carousel;
pub mod command;
pub mod domain;
#[cfg(test)]
mod fixture;
pub mod form;
pub mod images;
pub mod infra;
pub mod lifecycle;
pub mod notification;
pub mod query;
pub mod store;
pub mod validation;

use std::time::Duration;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Remote;

pub use self::{
    carousel::Carousel,
    command::Command,
    form::Form,
    lifecycle::{ExecutionError, Operation},
    notification::Notification,
    query::Query,
    store::Store,
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Time limit of a single [`Remote`] call.
    ///
    /// [`None`] means no limit.
    #[default(Some(Duration::from_secs(30)))]
    pub timeout: Option<Duration>,

    /// Optional [`validation::Rules`] applied on save.
    pub rules: validation::Rules,

    /// [`notification::Trigger`] of operation outcome [`Notification`]s.
    pub notification: notification::Trigger,
}

/// Domain service, orchestrating residence operations.
#[derive(Clone, Debug)]
pub struct Service<R> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Remote`] of this [`Service`].
    remote: R,

    /// [`Store`] of this [`Service`].
    store: Store,

    /// [`notification::Scheduler`] of this [`Service`].
    notifications: notification::Scheduler,
}

impl<R> Service<R> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, remote: R) -> Self {
        Self {
            config,
            remote,
            store: Store::new(),
            notifications: notification::Scheduler::new(config.notification),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Remote`] of this [`Service`].
    #[must_use]
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Returns [`Store`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns [`notification::Scheduler`] of this [`Service`].
    #[must_use]
    pub fn notifications(&self) -> &notification::Scheduler {
        &self.notifications
    }
}
