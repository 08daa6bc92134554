use crate::entities::prelude::*;
use crate::entities::{permission, user_permission, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;
use sea_orm_migration::sea_query::Query;

#[derive(DeriveMigrationName)]
pub struct Migration;

const PERMISSIONS: [(i64, &str); 3] = [(1, "ADMIN"), (2, "MANAGER"), (3, "COMMON_USER")];

/// (id, user name, full name, password, permission ids)
const SEED_USERS: [(i64, &str, &str, &str, &[i64]); 2] = [
    (1, "alison", "Alison Silva", "admin1234", &[1, 2]),
    (2, "leandro", "Leandro Costa", "admin234", &[2]),
];

/// Hash a seed password using Argon2id
fn hash_seed_password(password: &str) -> Result<String, DbErr> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DbErr::Migration(format!("Failed to hash seed password: {e}")))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Permission)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(UserPermission)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Permission)
            .columns([permission::Column::Id, permission::Column::Description])
            .to_owned();
        for (id, description) in PERMISSIONS {
            insert.values_panic([id.into(), description.into()]);
        }
        manager.exec_stmt(insert).await?;

        for (id, user_name, full_name, password, permission_ids) in SEED_USERS {
            let password_hash = hash_seed_password(password)?;

            let insert = Query::insert()
                .into_table(Users)
                .columns([
                    users::Column::Id,
                    users::Column::UserName,
                    users::Column::FullName,
                    users::Column::Password,
                    users::Column::AccountNonExpired,
                    users::Column::AccountNonLocked,
                    users::Column::CredentialsNonExpired,
                    users::Column::Enabled,
                ])
                .values_panic([
                    id.into(),
                    user_name.into(),
                    full_name.into(),
                    password_hash.into(),
                    true.into(),
                    true.into(),
                    true.into(),
                    true.into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;

            for permission_id in permission_ids {
                let insert = Query::insert()
                    .into_table(UserPermission)
                    .columns([
                        user_permission::Column::IdUser,
                        user_permission::Column::IdPermission,
                    ])
                    .values_panic([id.into(), (*permission_id).into()])
                    .to_owned();
                manager.exec_stmt(insert).await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPermission).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Permission).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await
    }
}
