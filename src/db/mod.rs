use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{Page, PageRequest};
use crate::entities::{books, person};

pub mod migrator;
pub mod repositories;

pub use repositories::book::BookInput;
pub use repositories::person::PersonInput;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn person_repo(&self) -> repositories::person::PersonRepository {
        repositories::person::PersonRepository::new(self.conn.clone())
    }

    fn book_repo(&self) -> repositories::book::BookRepository {
        repositories::book::BookRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_people(&self, request: PageRequest) -> Result<Page<person::Model>> {
        self.person_repo().find_all(request).await
    }

    pub async fn find_people_by_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<Page<person::Model>> {
        self.person_repo().find_by_name(first_name, request).await
    }

    pub async fn get_person(&self, id: i64) -> Result<Option<person::Model>> {
        self.person_repo().find_by_id(id).await
    }

    pub async fn add_person(&self, input: PersonInput) -> Result<person::Model> {
        self.person_repo().insert(input).await
    }

    pub async fn update_person(
        &self,
        id: i64,
        input: PersonInput,
    ) -> Result<Option<person::Model>> {
        self.person_repo().update(id, input).await
    }

    pub async fn disable_person(&self, id: i64) -> Result<u64> {
        self.person_repo().disable(id).await
    }

    pub async fn remove_person(&self, id: i64) -> Result<u64> {
        self.person_repo().delete(id).await
    }

    pub async fn list_books(&self, request: PageRequest) -> Result<Page<books::Model>> {
        self.book_repo().find_all(request).await
    }

    pub async fn get_book(&self, id: i64) -> Result<Option<books::Model>> {
        self.book_repo().find_by_id(id).await
    }

    pub async fn add_book(&self, input: BookInput) -> Result<books::Model> {
        self.book_repo().insert(input).await
    }

    pub async fn update_book(&self, id: i64, input: BookInput) -> Result<Option<books::Model>> {
        self.book_repo().update(id, input).await
    }

    pub async fn remove_book(&self, id: i64) -> Result<u64> {
        self.book_repo().delete(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortOrder;

    async fn test_store() -> (Store, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("restapi-store-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        (store, path)
    }

    fn stallman() -> PersonInput {
        PersonInput {
            first_name: "Richard".to_string(),
            last_name: "Stallman".to_string(),
            address: "New York City, New York, US".to_string(),
            gender: "Male".to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn person_lifecycle() {
        let (store, path) = test_store().await;
        store.ping().await.unwrap();

        let created = store.add_person(stallman()).await.unwrap();
        assert!(created.id > 0);
        assert!(created.enabled);

        let mut changes = stallman();
        changes.last_name = "Matthew Stallman".to_string();
        changes.enabled = false;
        let updated = store
            .update_person(created.id, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.last_name, "Matthew Stallman");
        assert!(updated.enabled, "update must not touch the enabled flag");

        assert_eq!(store.disable_person(created.id).await.unwrap(), 1);
        assert_eq!(store.disable_person(created.id).await.unwrap(), 1);
        let disabled = store.get_person(created.id).await.unwrap().unwrap();
        assert!(!disabled.enabled);

        assert_eq!(store.remove_person(created.id).await.unwrap(), 1);
        assert_eq!(store.remove_person(created.id).await.unwrap(), 0);
        assert!(store.get_person(created.id).await.unwrap().is_none());
        assert!(store.update_person(created.id, stallman()).await.unwrap().is_none());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive() {
        let (store, path) = test_store().await;
        for first in ["Ayrton", "Alan", "Linus", "Ada"] {
            let mut input = stallman();
            input.first_name = first.to_string();
            store.add_person(input).await.unwrap();
        }

        let page = store
            .find_people_by_name("A", PageRequest::new(0, 12, SortOrder::Ascending))
            .await
            .unwrap();
        let names: Vec<_> = page.content.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Alan", "Ayrton"]);
        assert_eq!(page.total_elements, 3);

        let page = store
            .find_people_by_name("yrt", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn find_by_name_folds_non_ascii() {
        let (store, path) = test_store().await;
        let mut input = stallman();
        input.first_name = "Élise".to_string();
        let elise = store.add_person(input).await.unwrap();

        for fragment in ["Élise", "élise", "ÉLISE", "lise", "éL"] {
            let page = store
                .find_people_by_name(fragment, PageRequest::default())
                .await
                .unwrap();
            assert_eq!(page.content.len(), 1, "{fragment}");
        }

        let page = store
            .find_people_by_name("%", PageRequest::default())
            .await
            .unwrap();
        assert!(page.content.is_empty());

        let mut renamed = stallman();
        renamed.first_name = "Øystein".to_string();
        store.update_person(elise.id, renamed).await.unwrap();

        let page = store
            .find_people_by_name("øYST", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        let page = store
            .find_people_by_name("élise", PageRequest::default())
            .await
            .unwrap();
        assert!(page.content.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn seeded_books_page_by_title() {
        let (store, path) = test_store().await;

        let page = store
            .list_books(PageRequest::new(0, 5, SortOrder::Descending))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_elements, 15);
        assert_eq!(page.total_pages, 3);
        let titles: Vec<_> = page.content.iter().map(|b| b.title.clone()).collect();
        let mut sorted = titles.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(titles, sorted);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn seeded_users_carry_roles() {
        let (store, path) = test_store().await;

        let alison = store.get_user_by_username("alison").await.unwrap().unwrap();
        assert_eq!(alison.roles, vec!["ADMIN", "MANAGER"]);
        assert!(alison.is_active());

        assert!(store.verify_user_password("alison", "admin1234").await.unwrap());
        assert!(!store.verify_user_password("alison", "nope").await.unwrap());
        assert!(!store.verify_user_password("ghost", "admin1234").await.unwrap());

        std::fs::remove_file(path).ok();
    }
}
