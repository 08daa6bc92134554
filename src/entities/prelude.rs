pub use super::books::Entity as Books;
pub use super::permission::Entity as Permission;
pub use super::person::Entity as Person;
pub use super::user_permission::Entity as UserPermission;
pub use super::users::Entity as Users;
