pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod person_service;
pub mod person_service_impl;
pub use person_service::{PersonError, PersonService};
pub use person_service_impl::SeaOrmPersonService;

pub mod book_service;
pub mod book_service_impl;
pub use book_service::{BookError, BookService};
pub use book_service_impl::SeaOrmBookService;

pub mod file_storage;
pub use file_storage::{FileStorage, FileStorageError};

pub mod math;
pub use math::MathError;

pub mod token_provider;
pub use token_provider::{Claims, TokenError, TokenProvider, TokenUse};
