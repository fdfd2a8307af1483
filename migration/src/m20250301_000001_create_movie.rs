use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string_len(Movie::Title, 256))
                    .col(string_null(Movie::PhotoUrl))
                    .col(string(Movie::ReleaseDate))
                    .col(text_null(Movie::Description))
                    .col(double(Movie::Rating))
                    .col(string_null(Movie::ReferenceUrl))
                    .col(string(Movie::Genre))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_title")
                    .table(Movie::Table)
                    .col(Movie::Title)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    PhotoUrl,
    ReleaseDate,
    Description,
    Rating,
    ReferenceUrl,
    Genre,
}
