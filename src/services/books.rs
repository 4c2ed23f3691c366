//! Book management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookResponse, BookSaveRequest},
    repository::Repository,
};

use super::notification::MailSender;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    mail_sender: Arc<dyn MailSender>,
}

impl BooksService {
    pub fn new(repository: Repository, mail_sender: Arc<dyn MailSender>) -> Self {
        Self {
            repository,
            mail_sender,
        }
    }

    /// Store a new book and send the registration notice.
    ///
    /// The insert is rolled back if the notice cannot be delivered, so a
    /// failed registration never leaves a row behind.
    pub async fn register(&self, data: &BookSaveRequest) -> AppResult<BookResponse> {
        let mut tx = self.repository.begin().await?;

        let book = self
            .repository
            .books
            .save(&mut *tx, data)
            .await?
            .ok_or_else(|| AppError::Internal("Book was not persisted".to_string()))?;

        if !self.mail_sender.send(&book).await {
            tx.rollback().await?;
            tracing::warn!("Registration of \"{}\" rolled back: mail not sent", book.title);
            return Err(AppError::NotificationFailed("Mail was not sent".to_string()));
        }

        tx.commit().await?;
        tracing::info!("Registered book {}", book.id);

        Ok(book.into())
    }

    /// List all books
    pub async fn list_all(&self) -> AppResult<Vec<BookResponse>> {
        let books = self.repository.books.find_all(&self.repository.pool).await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookResponse> {
        self.repository
            .books
            .find_by_id(&self.repository.pool, id)
            .await?
            .map(BookResponse::from)
            .ok_or_else(|| not_found(id))
    }

    /// Replace title and author of an existing book
    pub async fn update(&self, id: i64, data: &BookSaveRequest) -> AppResult<BookResponse> {
        let mut tx = self.repository.begin().await?;

        let mut book = self
            .repository
            .books
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        book.apply(data);
        self.repository.books.update(&mut *tx, &book).await?;

        tx.commit().await?;
        tracing::info!("Updated book {}", id);

        Ok(book.into())
    }

    /// Delete a book; unknown ids are not an error
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository.books.delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("No book with id {}", id))
}
