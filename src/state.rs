use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::models::LinkBuilder;
use crate::services::{
    AuthService, BookService, FileStorage, PersonService, SeaOrmAuthService, SeaOrmBookService,
    SeaOrmPersonService, TokenProvider,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub links: LinkBuilder,

    pub auth_service: Arc<dyn AuthService>,

    pub person_service: Arc<dyn PersonService>,

    pub book_service: Arc<dyn BookService>,

    pub file_storage: Arc<FileStorage>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires every service on top of an already migrated store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let links = LinkBuilder::new(&config.server.public_base_url);
        let tokens = Arc::new(TokenProvider::new(&config.security));
        let file_storage = Arc::new(FileStorage::new(&config.file.upload_dir)?);

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), tokens))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let person_service = Arc::new(SeaOrmPersonService::new(store.clone(), links.clone()))
            as Arc<dyn PersonService + Send + Sync + 'static>;

        let book_service = Arc::new(SeaOrmBookService::new(store.clone(), links.clone()))
            as Arc<dyn BookService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            links,
            auth_service,
            person_service,
            book_service,
            file_storage,
        })
    }
}
