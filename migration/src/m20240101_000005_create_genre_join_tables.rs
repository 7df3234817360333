use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_genre_table::Genre;
use super::m20240101_000002_create_venue_table::Venue;
use super::m20240101_000003_create_artist_table::Artist;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VenueGenre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VenueGenre::VenueId).integer().not_null())
                    .col(ColumnDef::new(VenueGenre::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VenueGenre::VenueId)
                            .col(VenueGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_genre_venue_id")
                            .from(VenueGenre::Table, VenueGenre::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_genre_genre_id")
                            .from(VenueGenre::Table, VenueGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ArtistGenre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ArtistGenre::ArtistId).integer().not_null())
                    .col(ColumnDef::new(ArtistGenre::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ArtistGenre::ArtistId)
                            .col(ArtistGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_genre_artist_id")
                            .from(ArtistGenre::Table, ArtistGenre::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_genre_genre_id")
                            .from(ArtistGenre::Table, ArtistGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtistGenre::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(VenueGenre::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VenueGenre {
    Table,
    VenueId,
    GenreId,
}

#[derive(DeriveIden)]
pub enum ArtistGenre {
    Table,
    ArtistId,
    GenreId,
}
