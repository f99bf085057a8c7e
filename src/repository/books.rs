//! In-memory book store

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookSummary},
};

/// Book collection in insertion order.
///
/// Mutations take the write lock for their whole duration, reads share the
/// read lock, so every stored book satisfies the model invariants between
/// operations.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new book, returning its id
    pub async fn create(&self, body: Value) -> AppResult<String> {
        let fields = BookPayload::validate_json(body)
            .map_err(|e| AppError::Validation(e.create_message()))?;

        let mut books = self.books.write().await;
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !books.iter().any(|book| book.id == candidate) {
                break candidate;
            }
        };

        books.push(Book::new(id.clone(), fields, Utc::now()));
        Ok(id)
    }

    /// List `{id, name, publisher}` projections in insertion order
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let books = self.books.read().await;
        Ok(books.iter().map(BookSummary::from).collect())
    }

    /// Get a full book record by id
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let books = self.books.read().await;
        books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))
    }

    /// Replace every mutable field of a book.
    ///
    /// The id is resolved before the body is looked at: an unknown id is
    /// reported even when the body itself is unusable.
    pub async fn update(&self, id: &str, body: AppResult<Value>) -> AppResult<()> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| {
                AppError::NotFound("Gagal memperbarui buku. Id tidak ditemukan".to_string())
            })?;

        let fields = BookPayload::validate_json(body?)
            .map_err(|e| AppError::Validation(e.update_message()))?;

        book.apply(fields, Utc::now());
        Ok(())
    }

    /// Remove a book, keeping the order of the remaining ones
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| {
                AppError::NotFound("Buku gagal dihapus. Id tidak ditemukan".to_string())
            })?;

        books.remove(index);
        Ok(())
    }

    /// Number of stored books
    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}
