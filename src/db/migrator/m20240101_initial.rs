use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Person)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Books)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Sorted listings page through these columns
        manager
            .create_index(
                Index::create()
                    .name("idx_person_first_name")
                    .table(Person)
                    .col(crate::entities::person::Column::FirstName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_books_title")
                    .table(Books)
                    .col(crate::entities::books::Column::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Person).to_owned())
            .await
    }
}
