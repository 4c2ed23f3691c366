//! Book API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{BookResponse, BookSaveRequest},
    AppState,
};

use super::{response::CommonResponse, BookId, ValidatedJson};

/// Register a book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = BookSaveRequest,
    responses(
        (status = 201, description = "Book created, wrapped in the common envelope", body = BookResponse),
        (status = 400, description = "Invalid fields or notification failure")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<BookSaveRequest>,
) -> AppResult<(StatusCode, Json<CommonResponse<BookResponse>>)> {
    let book = state.services.books.register(&data).await?;
    Ok((StatusCode::CREATED, Json(CommonResponse::success("created", book))))
}

/// List all books
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    responses(
        (status = 200, description = "Book list, wrapped in the common envelope", body = [BookResponse])
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
) -> AppResult<Json<CommonResponse<Vec<BookResponse>>>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(CommonResponse::success("listed", books)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details, wrapped in the common envelope", body = BookResponse),
        (status = 400, description = "Unknown book")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<CommonResponse<BookResponse>>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(CommonResponse::success("found", book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookSaveRequest,
    responses(
        (status = 200, description = "Book updated, wrapped in the common envelope", body = BookResponse),
        (status = 400, description = "Invalid fields or unknown book")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    ValidatedJson(data): ValidatedJson<BookSaveRequest>,
) -> AppResult<Json<CommonResponse<BookResponse>>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(CommonResponse::success("updated", book)))
}

/// Delete a book (succeeds for unknown ids too)
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted, envelope body is null")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<CommonResponse<()>>> {
    state.services.books.delete(id).await?;
    Ok(Json(CommonResponse::empty("deleted")))
}
