use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub first_name: String,

    /// `first_name` folded with [`fold_name`]; name searches match against it.
    pub first_name_folded: String,

    pub last_name: String,

    pub address: String,

    pub gender: String,

    /// Cleared by the soft-disable operation, never set back by updates.
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Unicode lowercase fold. SQLite's own `lower()` only folds ASCII.
#[must_use]
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
