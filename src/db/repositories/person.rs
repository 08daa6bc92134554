use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::LikeExpr,
};

use super::fetch_page;
use crate::domain::{Page, PageRequest};
use crate::entities::{person, prelude::*};

/// Fields accepted when creating or overwriting a person.
#[derive(Debug, Clone)]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub enabled: bool,
}

pub struct PersonRepository {
    conn: DatabaseConnection,
}

impl PersonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<Page<person::Model>> {
        fetch_page(&self.conn, Person::find(), person::Column::FirstName, request)
            .await
            .context("Failed to page people")
    }

    /// Case-insensitive substring match on the first name.
    pub async fn find_by_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<Page<person::Model>> {
        let query = Person::find().filter(
            Expr::col(person::Column::FirstNameFolded)
                .like(LikeExpr::new(like_pattern(first_name)).escape('\\')),
        );

        fetch_page(&self.conn, query, person::Column::FirstName, request)
            .await
            .context("Failed to page people by name")
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<person::Model>> {
        Person::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query person by ID")
    }

    pub async fn insert(&self, input: PersonInput) -> Result<person::Model> {
        let active = person::ActiveModel {
            first_name_folded: Set(person::fold_name(&input.first_name)),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            address: Set(input.address),
            gender: Set(input.gender),
            enabled: Set(input.enabled),
            ..Default::default()
        };

        active.insert(&self.conn).await.context("Failed to insert person")
    }

    /// Overwrites the editable fields. `enabled` is left as stored.
    /// Returns `None` when no row has this id.
    pub async fn update(&self, id: i64, input: PersonInput) -> Result<Option<person::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: person::ActiveModel = existing.into();
        active.first_name_folded = Set(person::fold_name(&input.first_name));
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.address = Set(input.address);
        active.gender = Set(input.gender);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update person")?;

        Ok(Some(updated))
    }

    /// Clears the enabled flag. Returns the number of rows touched.
    pub async fn disable(&self, id: i64) -> Result<u64> {
        let result = Person::update_many()
            .col_expr(person::Column::Enabled, Expr::value(false))
            .filter(person::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to disable person")?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = Person::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete person")?;

        Ok(result.rows_affected)
    }
}

/// `%fragment%` over the folded name, with LIKE wildcards in the fragment escaped.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::from("%");
    for c in person::fold_name(fragment).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
