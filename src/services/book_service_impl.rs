//! `SeaORM` implementation of the `BookService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::constants::routes;
use crate::db::{BookInput, Store};
use crate::domain::{Page, PageRequest};
use crate::mapper;
use crate::models::{BookVo, LinkBuilder, PagedModel};
use crate::services::book_service::{BookError, BookService};

pub struct SeaOrmBookService {
    store: Store,
    links: LinkBuilder,
}

impl SeaOrmBookService {
    #[must_use]
    pub const fn new(store: Store, links: LinkBuilder) -> Self {
        Self { store, links }
    }

    fn with_links(&self, mut vo: BookVo) -> BookVo {
        self.links.attach(&mut vo);
        vo
    }
}

#[async_trait]
impl BookService for SeaOrmBookService {
    async fn find_all(&self, request: PageRequest) -> Result<PagedModel<BookVo>, BookError> {
        debug!(page = request.page, size = request.size, "Finding all books");

        let page: Page<BookVo> = self
            .store
            .list_books(request)
            .await?
            .map_content(mapper::parse_list_objects);
        Ok(PagedModel::new(page, &self.links, routes::BOOK))
    }

    async fn find_by_id(&self, id: i64) -> Result<BookVo, BookError> {
        let vo = mapper::parse_object(self.store.get_book(id).await?)
            .ok_or(BookError::NotFound(id))?;
        Ok(self.with_links(vo))
    }

    async fn create(&self, book: Option<BookVo>) -> Result<BookVo, BookError> {
        let book = book.ok_or(BookError::RequiredObjectIsNull)?;

        let created = self.store.add_book(BookInput::from(book)).await?;
        info!(id = created.id, "Book created");
        Ok(self.with_links(BookVo::from(created)))
    }

    async fn update(&self, book: Option<BookVo>) -> Result<BookVo, BookError> {
        let book = book.ok_or(BookError::RequiredObjectIsNull)?;
        let id = book.key.ok_or(BookError::NotFound(0))?;

        let updated = self
            .store
            .update_book(id, BookInput::from(book))
            .await?
            .ok_or(BookError::NotFound(id))?;

        info!(id, "Book updated");
        Ok(self.with_links(BookVo::from(updated)))
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        let removed = self.store.remove_book(id).await?;
        info!(id, removed, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortOrder;
    use chrono::NaiveDate;

    async fn service() -> (SeaOrmBookService, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("restapi-book-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        (SeaOrmBookService::new(store, LinkBuilder::default()), path)
    }

    fn mock_book() -> BookVo {
        BookVo {
            key: None,
            author: "Some Author1".to_string(),
            launch_date: NaiveDate::from_ymd_opt(2020, 5, 17)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            price: 25.0,
            title: "Some Title1".to_string(),
            links: None,
        }
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let (service, path) = service().await;

        let created = service.create(Some(mock_book())).await.unwrap();
        let id = created.key.unwrap();
        assert_eq!(
            created.links.as_ref().unwrap().self_link.href,
            format!("/api/book/v1/{id}")
        );
        assert_eq!(service.find_by_id(id).await.unwrap(), created);

        let mut changes = created.clone();
        changes.price = 30.5;
        changes.title = "Some Title2".to_string();
        let updated = service.update(Some(changes)).await.unwrap();
        assert_eq!(updated.key, Some(id));
        assert!((updated.price - 30.5).abs() < f64::EPSILON);
        assert_eq!(updated.title, "Some Title2");

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
        assert!(matches!(service.find_by_id(id).await, Err(BookError::NotFound(_))));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn null_book_is_rejected() {
        let (service, path) = service().await;

        let err = service.create(None).await.unwrap_err();
        assert_eq!(err.to_string(), "It's not allowed to persist a null object");
        assert!(matches!(service.update(None).await, Err(BookError::RequiredObjectIsNull)));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn seeded_catalogue_pages() {
        let (service, path) = service().await;

        let page = service
            .find_all(PageRequest::new(2, 6, SortOrder::Ascending))
            .await
            .unwrap();
        assert_eq!(page.page.total_elements, 15);
        assert_eq!(page.page.total_pages, 3);
        assert_eq!(page.content().len(), 3);
        assert!(page.links.next.is_none());
        assert!(page.links.prev.is_some());

        std::fs::remove_file(path).ok();
    }
}
