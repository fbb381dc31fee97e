//! Email notifications.
//!
//! - `message`: builds the `Notification` for an outcome (subject by kind,
//!   body stating the address)
//! - `mailer`: delivers it through an SMTP relay with STARTTLS and login
//!
//! Delivery is best effort. `Mailer::deliver` logs failures and returns
//! `false` rather than propagating them.

pub mod error;
pub mod mailer;
pub mod message;

pub use error::NotifyError;
pub use mailer::Mailer;
pub use message::{compose_notification, Notification, ALERT_SUBJECT, REMINDER_SUBJECT};
