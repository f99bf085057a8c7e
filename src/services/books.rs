//! Book shelf service

use serde_json::Value;

use crate::{
    error::AppResult,
    models::book::{Book, BookSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book, returning its generated id
    pub async fn create(&self, body: Value) -> AppResult<String> {
        let id = self.repository.books.create(body).await?;
        tracing::info!(book_id = %id, "Book added");
        Ok(id)
    }

    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Update a book. `body` carries the body parse outcome so that an
    /// unknown id is still reported first.
    pub async fn update(&self, id: &str, body: AppResult<Value>) -> AppResult<()> {
        self.repository.books.update(id, body).await?;
        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Number of stored books (for health reporting)
    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}
