//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookSummary},
    AppState,
};

use super::JsonBody;

/// Envelope status carried by every successful body
pub const STATUS_SUCCESS: &str = "success";

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}

/// Response to a successful add
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: String,
    pub message: String,
    pub data: BookIdData,
}

#[derive(Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: String,
    pub data: BookListData,
}

#[derive(Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: String,
    pub data: BookData,
}

/// Success envelope carrying only a message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.to_string(),
        }
    }
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = BookCreatedResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book_id = state.services.books.create(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: STATUS_SUCCESS.to_string(),
            message: "Buku berhasil ditambahkan".to_string(),
            data: BookIdData { book_id },
        }),
    ))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books in insertion order", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookListResponse>> {
    let books = state.services.books.list().await?;

    Ok(Json(BookListResponse {
        status: STATUS_SUCCESS.to_string(),
        data: BookListData { books },
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.books.get_by_id(&book_id).await?;

    Ok(Json(BookDetailResponse {
        status: STATUS_SUCCESS.to_string(),
        data: BookData { book },
    }))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    body: Result<JsonBody<Value>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    // Body errors are only reported once the id is known to exist
    let body = body.map(|JsonBody(body)| body);
    state.services.books.update(&book_id, body).await?;

    Ok(Json(MessageResponse::success("Buku berhasil diperbarui")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&book_id).await?;

    Ok(Json(MessageResponse::success("Buku berhasil dihapus")))
}
