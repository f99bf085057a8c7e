//! Book model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
    /// True exactly when `read_page == page_count`
    pub finished: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(id: String, fields: BookFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            finished: fields.is_finished(),
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `inserted_at` are kept.
    pub fn apply(&mut self, fields: BookFields, now: DateTime<Utc>) {
        self.finished = fields.is_finished();
        self.name = fields.name;
        self.year = fields.year;
        self.author = fields.author;
        self.summary = fields.summary;
        self.publisher = fields.publisher;
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        // Wall clock may step backwards
        self.updated_at = now.max(self.inserted_at);
    }
}

/// List projection of a book
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Absent or `null` counts as 0
    pub page_count: Option<u32>,
    /// Absent or `null` counts as 0
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Validate a raw request body.
    ///
    /// The name rule runs on the raw JSON, so a nameless body is rejected for
    /// its name even when other fields have the wrong type.
    pub fn validate_json(body: Value) -> Result<BookFields, PayloadError> {
        if !has_name(&body) {
            return Err(PayloadError::MissingName);
        }

        serde_json::from_value::<BookPayload>(body)
            .map_err(|e| PayloadError::Malformed(e.to_string()))?
            .validate()
    }

    /// Check the payload: name first, then page counts.
    pub fn validate(self) -> Result<BookFields, PayloadError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(PayloadError::MissingName),
        };

        let page_count = self.page_count.unwrap_or_default();
        let read_page = self.read_page.unwrap_or_default();
        if read_page > page_count {
            return Err(PayloadError::ReadPageExceedsPageCount);
        }

        Ok(BookFields {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count,
            read_page,
            reading: self.reading.unwrap_or_default(),
        })
    }
}

/// Whether a raw body carries a usable name (absent, `null`, `false`, `0` and `""` do not)
fn has_name(body: &Value) -> bool {
    match body.get("name") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(name)) => !name.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

/// Mutable book fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Reason a payload was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("name is missing or empty")]
    MissingName,
    #[error("readPage is greater than pageCount")]
    ReadPageExceedsPageCount,
    /// A named body whose fields do not have the expected types
    #[error("{0}")]
    Malformed(String),
}

impl PayloadError {
    /// Client-facing message when adding a book
    pub fn create_message(&self) -> String {
        match self {
            PayloadError::MissingName => "Gagal menambahkan buku. Mohon isi nama buku".to_string(),
            PayloadError::ReadPageExceedsPageCount => {
                "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount".to_string()
            }
            PayloadError::Malformed(detail) => format!("Gagal menambahkan buku. {}", detail),
        }
    }

    /// Client-facing message when updating a book
    pub fn update_message(&self) -> String {
        match self {
            PayloadError::MissingName => "Gagal memperbarui buku. Mohon isi nama buku".to_string(),
            PayloadError::ReadPageExceedsPageCount => {
                "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount".to_string()
            }
            PayloadError::Malformed(detail) => format!("Gagal memperbarui buku. {}", detail),
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`
fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
