//! Notification capability used when a book is registered

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{config::EmailConfig, models::book::Book};

/// Sends the "new book" notice. Returns `false` when the notice could not
/// be delivered; it never errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, book: &Book) -> bool;
}

/// Always reports success. Used when email is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubMailSender;

#[async_trait]
impl MailSender for StubMailSender {
    async fn send(&self, book: &Book) -> bool {
        tracing::debug!("Mail stub: book {} registered", book.id);
        true
    }
}

/// SMTP delivery through lettre
#[derive(Clone)]
pub struct SmtpMailSender {
    config: EmailConfig,
}

impl SmtpMailSender {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, book: &Book) -> Result<Message, String> {
        let from_name = self.config.smtp_from_name.as_deref().unwrap_or("Bookshelf");
        let from = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| format!("Invalid from address: {}", e))?;
        let to = Mailbox::from_str(&self.config.notify_to)
            .map_err(|e| format!("Invalid to address: {}", e))?;

        let body = format!(
            "A new book was registered.\n\nId: {}\nTitle: {}\nAuthor: {}\n",
            book.id, book.title, book.author
        );

        Message::builder()
            .from(from)
            .to(to)
            .subject(format!("New book: {}", book.title))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| format!("Failed to build email: {}", e))
    }

    fn transport(&self) -> Result<SmtpTransport, String> {
        let builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let builder = match (&self.config.smtp_username, &self.config.smtp_password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(builder.build())
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, book: &Book) -> bool {
        let prepared = self
            .build_message(book)
            .and_then(|message| Ok((message, self.transport()?)));

        let (message, mailer) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!("Notification for book {} not sent: {}", book.id, e);
                return false;
            }
        };

        // lettre's SmtpTransport blocks
        let result = tokio::task::spawn_blocking(move || mailer.send(&message)).await;

        match result {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!("Notification for book {} not sent: {}", book.id, e);
                false
            }
            Err(e) => {
                tracing::warn!("Notification task for book {} failed: {}", book.id, e);
                false
            }
        }
    }
}
