//! Domain service for people.

use thiserror::Error;

use crate::constants::messages;
use crate::domain::PageRequest;
use crate::models::{PagedModel, PersonVo};

#[derive(Debug, Error)]
pub enum PersonError {
    #[error("{}", messages::NULL_OBJECT)]
    RequiredObjectIsNull,

    #[error("{}", messages::NO_RECORDS)]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for PersonError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait PersonService: Send + Sync {
    /// Page of people sorted by first name.
    async fn find_all(&self, request: PageRequest) -> Result<PagedModel<PersonVo>, PersonError>;

    /// Case-insensitive substring search on the first name.
    async fn find_by_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<PagedModel<PersonVo>, PersonError>;

    async fn find_by_id(&self, id: i64) -> Result<PersonVo, PersonError>;

    async fn create(&self, person: Option<PersonVo>) -> Result<PersonVo, PersonError>;

    /// Overwrites first name, last name, address and gender of an existing person.
    async fn update(&self, person: Option<PersonVo>) -> Result<PersonVo, PersonError>;

    /// Sets `enabled = false`. Repeating the call is harmless.
    async fn disable(&self, id: i64) -> Result<PersonVo, PersonError>;

    /// Removes the person. Unknown ids are ignored.
    async fn delete(&self, id: i64) -> Result<(), PersonError>;
}
