//! `SeaORM` implementation of the `PersonService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::constants::routes;
use crate::db::{PersonInput, Store};
use crate::domain::{Page, PageRequest};
use crate::mapper;
use crate::models::{LinkBuilder, PagedModel, PersonVo};
use crate::services::person_service::{PersonError, PersonService};

pub struct SeaOrmPersonService {
    store: Store,
    links: LinkBuilder,
}

impl SeaOrmPersonService {
    #[must_use]
    pub const fn new(store: Store, links: LinkBuilder) -> Self {
        Self { store, links }
    }

    fn with_links(&self, mut vo: PersonVo) -> PersonVo {
        self.links.attach(&mut vo);
        vo
    }
}

#[async_trait]
impl PersonService for SeaOrmPersonService {
    async fn find_all(&self, request: PageRequest) -> Result<PagedModel<PersonVo>, PersonError> {
        debug!(page = request.page, size = request.size, "Finding all people");

        let page: Page<PersonVo> = self
            .store
            .list_people(request)
            .await?
            .map_content(mapper::parse_list_objects);
        Ok(PagedModel::new(page, &self.links, routes::PERSON))
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<PagedModel<PersonVo>, PersonError> {
        debug!(first_name, "Finding people by name");

        let page: Page<PersonVo> = self
            .store
            .find_people_by_name(first_name, request)
            .await?
            .map_content(mapper::parse_list_objects);

        let path = format!(
            "{}/{}/{}",
            routes::PERSON,
            routes::FIND_PERSON_BY_NAME,
            urlencoding::encode(first_name)
        );
        Ok(PagedModel::new(page, &self.links, &path))
    }

    async fn find_by_id(&self, id: i64) -> Result<PersonVo, PersonError> {
        let vo = mapper::parse_object(self.store.get_person(id).await?)
            .ok_or(PersonError::NotFound(id))?;
        Ok(self.with_links(vo))
    }

    async fn create(&self, person: Option<PersonVo>) -> Result<PersonVo, PersonError> {
        let person = person.ok_or(PersonError::RequiredObjectIsNull)?;

        let created = self.store.add_person(PersonInput::from(person)).await?;
        info!(id = created.id, "Person created");
        Ok(self.with_links(PersonVo::from(created)))
    }

    async fn update(&self, person: Option<PersonVo>) -> Result<PersonVo, PersonError> {
        let person = person.ok_or(PersonError::RequiredObjectIsNull)?;
        let id = person.key.ok_or(PersonError::NotFound(0))?;

        let updated = self
            .store
            .update_person(id, PersonInput::from(person))
            .await?
            .ok_or(PersonError::NotFound(id))?;

        info!(id, "Person updated");
        Ok(self.with_links(PersonVo::from(updated)))
    }

    async fn disable(&self, id: i64) -> Result<PersonVo, PersonError> {
        if self.store.disable_person(id).await? == 0 {
            return Err(PersonError::NotFound(id));
        }

        info!(id, "Person disabled");
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), PersonError> {
        let removed = self.store.remove_person(id).await?;
        info!(id, removed, "Person deleted");
        Ok(())
    }
}
