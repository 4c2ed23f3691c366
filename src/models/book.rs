//! Book model

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Book row as stored in the `book` table.
///
/// Never leaves the service layer; callers get a [`BookResponse`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl Book {
    /// Overwrite the mutable fields from a request. The caller is responsible
    /// for writing the row back.
    pub fn apply(&mut self, data: &BookSaveRequest) {
        self.title = data.title.clone();
        self.author = data.author.clone();
    }
}

/// Book as returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookSaveRequest {
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub author: String,
}

impl BookSaveRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// `null` is treated like a missing field so it fails validation by name
fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
