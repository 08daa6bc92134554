pub mod prelude;

pub mod books;
pub mod permission;
pub mod person;
pub mod user_permission;
pub mod users;
