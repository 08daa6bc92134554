use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::fetch_page;
use crate::domain::{Page, PageRequest};
use crate::entities::{books, prelude::*};

#[derive(Debug, Clone)]
pub struct BookInput {
    pub author: String,
    pub launch_date: NaiveDateTime,
    pub price: f64,
    pub title: String,
}

pub struct BookRepository {
    conn: DatabaseConnection,
}

impl BookRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<Page<books::Model>> {
        fetch_page(&self.conn, Books::find(), books::Column::Title, request)
            .await
            .context("Failed to page books")
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<books::Model>> {
        Books::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query book by ID")
    }

    pub async fn insert(&self, input: BookInput) -> Result<books::Model> {
        let active = books::ActiveModel {
            author: Set(input.author),
            launch_date: Set(input.launch_date),
            price: Set(input.price),
            title: Set(input.title),
            ..Default::default()
        };

        active.insert(&self.conn).await.context("Failed to insert book")
    }

    pub async fn update(&self, id: i64, input: BookInput) -> Result<Option<books::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: books::ActiveModel = existing.into();
        active.author = Set(input.author);
        active.launch_date = Set(input.launch_date);
        active.price = Set(input.price);
        active.title = Set(input.title);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update book")?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = Books::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete book")?;

        Ok(result.rows_affected)
    }
}
