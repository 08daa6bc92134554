//! Domain service for books.

use thiserror::Error;

use crate::constants::messages;
use crate::domain::PageRequest;
use crate::models::{BookVo, PagedModel};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{}", messages::NULL_OBJECT)]
    RequiredObjectIsNull,

    #[error("{}", messages::NO_RECORDS)]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    /// Page of books sorted by title.
    async fn find_all(&self, request: PageRequest) -> Result<PagedModel<BookVo>, BookError>;

    async fn find_by_id(&self, id: i64) -> Result<BookVo, BookError>;

    async fn create(&self, book: Option<BookVo>) -> Result<BookVo, BookError>;

    async fn update(&self, book: Option<BookVo>) -> Result<BookVo, BookError>;

    async fn delete(&self, id: i64) -> Result<(), BookError>;
}
