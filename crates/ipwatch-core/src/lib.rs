//! Core library for ipwatch.
//!
//! ipwatch checks the host's external IP address, compares it against a
//! one-line cache file and emails a human when the address changes or when
//! a weekly reminder is due. This crate holds everything except the binary:
//!
//! - `api`: external address lookup over HTTP
//! - `monitor`: the cache file and the notify/remind/no-op policy
//! - `notify`: message composition and SMTP delivery
//! - `config`: mail config file and runtime settings

pub mod api;
pub mod config;
pub mod monitor;
pub mod notify;

pub use api::{AddressClient, ApiError};
pub use config::{Config, Settings};
pub use monitor::{evaluate_and_update, ActionOutcome, AddressCache, StoredAddress};
pub use notify::{compose_notification, Mailer, Notification, NotifyError};
