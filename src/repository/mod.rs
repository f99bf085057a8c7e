//! Repository layer holding the in-memory collections

pub mod books;

/// Main repository struct holding every store
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository with empty collections
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
