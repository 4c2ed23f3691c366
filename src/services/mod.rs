//! Business logic services

pub mod books;
pub mod notification;

use std::sync::Arc;

use crate::{config::EmailConfig, repository::Repository};

use notification::{MailSender, SmtpMailSender, StubMailSender};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository and mail capability
    pub fn new(repository: Repository, mail_sender: Arc<dyn MailSender>) -> Self {
        Self {
            books: books::BooksService::new(repository.clone(), mail_sender),
            repository,
        }
    }

    /// Pick the mail capability from configuration
    pub fn mail_sender(config: &EmailConfig) -> Arc<dyn MailSender> {
        if config.enabled {
            Arc::new(SmtpMailSender::new(config.clone()))
        } else {
            tracing::info!("Email disabled, registrations use the mail stub");
            Arc::new(StubMailSender)
        }
    }
}
