use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create products table
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_len(Products::Name, 30))
                    .col(string_len(Products::Price, 30))
                    .col(text(Products::Image))
                    .col(string(Products::Weight))
                    .col(
                        timestamp_with_time_zone(Products::CreatedOn)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Products::UpdatedOn))
                    .to_owned(),
            )
            .await?;

        // Non-unique index on name: duplicate detection happens in the
        // data-access layer, not as a store constraint.
        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Image,
    Weight,
    CreatedOn,
    UpdatedOn,
}
