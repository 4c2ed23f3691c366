//! Books repository for database operations
//!
//! Every method takes the executor to run on, so the same queries serve
//! plain pool reads and statements inside a service-owned transaction.

use sqlx::{Executor, Sqlite};

use crate::{
    error::AppResult,
    models::book::{Book, BookSaveRequest},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct BooksRepository;

impl BooksRepository {
    /// Insert a book and return the stored row
    pub async fn save<'e, E>(&self, executor: E, data: &BookSaveRequest) -> AppResult<Option<Book>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (title, author)
            VALUES (?, ?)
            RETURNING id, title, author
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    /// List all books in storage order
    pub async fn find_all<'e, E>(&self, executor: E) -> AppResult<Vec<Book>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, Book>("SELECT id, title, author FROM book ORDER BY id")
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> AppResult<Option<Book>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, Book>("SELECT id, title, author FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Write title and author back for an existing row
    pub async fn update<'e, E>(&self, executor: E, book: &Book) -> AppResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE book SET title = ?, author = ? WHERE id = ?")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Delete book by ID (absent ids are ignored)
    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> AppResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
