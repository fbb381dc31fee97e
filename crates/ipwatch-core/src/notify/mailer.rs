use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{error, info};

use super::{Notification, NotifyError};
use crate::config::Config;

/// SMTP relay client using STARTTLS and username/password login.
pub struct Mailer {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials: Credentials::new(config.username.clone(), config.password.clone()),
        }
    }

    /// Send `notification`, returning any failure.
    pub async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = notification.to_message()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        transport.send(message).await?;
        Ok(())
    }

    /// Send `notification`, logging and swallowing any failure.
    ///
    /// Returns whether the relay accepted the message.
    pub async fn deliver(&self, notification: &Notification) -> bool {
        match self.send(notification).await {
            Ok(()) => {
                info!(
                    relay = %self.host,
                    to = %notification.to,
                    subject = %notification.subject,
                    "Notification sent"
                );
                true
            }
            Err(e) => {
                error!(relay = %self.host, port = self.port, error = %e, "Failed to send notification");
                false
            }
        }
    }
}
