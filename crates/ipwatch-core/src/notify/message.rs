use lettre::message::{header::ContentType, Mailbox};
use lettre::Message;

use super::NotifyError;
use crate::config::Config;
use crate::monitor::ActionOutcome;

pub const REMINDER_SUBJECT: &str = "Info: External IP Address Reminder";
pub const ALERT_SUBJECT: &str = "Alert: External IP Address Changed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Build the notification for `outcome`, or `None` if nothing should be sent.
pub fn compose_notification(
    address: &str,
    outcome: ActionOutcome,
    config: &Config,
) -> Option<Notification> {
    let subject = match outcome {
        ActionOutcome::None => return None,
        ActionOutcome::Reminder => REMINDER_SUBJECT,
        ActionOutcome::ChangeAlert => ALERT_SUBJECT,
    };

    Some(Notification {
        from: config.from.clone(),
        to: config.to.clone(),
        subject: subject.to_string(),
        body: format!("Currently, the IP address is: {}", address),
    })
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, NotifyError> {
    value.parse().map_err(|source| NotifyError::InvalidAddress {
        field,
        value: value.to_string(),
        source,
    })
}

impl Notification {
    /// Convert to a plain-text RFC 5322 message.
    pub fn to_message(&self) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(parse_mailbox("From", &self.from)?)
            .to(parse_mailbox("To", &self.to)?)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())?;
        Ok(message)
    }
}
