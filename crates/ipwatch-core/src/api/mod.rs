//! External address lookup.
//!
//! This module provides the `AddressClient` for asking an address-echo
//! service (api.ipify.org by default) which address this host appears to
//! connect from. The service answers a plain GET with the address as text.

pub mod client;
pub mod error;

pub use client::{AddressClient, DEFAULT_LOOKUP_URL};
pub use error::ApiError;
