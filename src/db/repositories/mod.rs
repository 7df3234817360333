//! Explicit data-access functions over any sea-orm connection.
//!
//! Every repository borrows a `ConnectionTrait` implementor so the same code
//! runs against the pooled connection for reads and against an open
//! `DatabaseTransaction` inside the booking mutations.

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
};

use crate::db::entities::{artist, artist_genre, genre, show, venue, venue_genre};
use crate::error::{AppError, Result};

/// Build a case-insensitive `LIKE` pattern matching `term` anywhere in a
/// value. `%`, `_` and the escape character itself are matched literally.
pub fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn name_contains<T>(column: T, term: &str) -> SimpleExpr
where
    T: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(substring_pattern(term)).escape('\\'))
}

pub struct VenueRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VenueRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn all(&self) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .filter(name_contains(venue::Column::Name, term))
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(venue::Entity::find().count(self.db).await?)
    }

    pub async fn create(&self, venue: venue::ActiveModel) -> Result<venue::Model> {
        Ok(venue.insert(self.db).await?)
    }
}

pub struct ArtistRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArtistRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn all(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(name_contains(artist::Column::Name, term))
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(artist::Entity::find().count(self.db).await?)
    }

    pub async fn create(&self, artist: artist::ActiveModel) -> Result<artist::Model> {
        Ok(artist.insert(self.db).await?)
    }
}

pub struct GenreRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GenreRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<genre::Model>> {
        Ok(genre::Entity::find()
            .filter(genre::Column::Name.eq(name))
            .one(self.db)
            .await?)
    }

    pub async fn all(&self) -> Result<Vec<genre::Model>> {
        Ok(genre::Entity::find()
            .order_by_asc(genre::Column::Name)
            .all(self.db)
            .await?)
    }

    pub async fn names_for_venue(&self, venue_id: i32) -> Result<Vec<String>> {
        let rows = venue_genre::Entity::find()
            .filter(venue_genre::Column::VenueId.eq(venue_id))
            .find_also_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, genre)| genre.map(|g| g.name))
            .collect())
    }

    pub async fn names_for_artist(&self, artist_id: i32) -> Result<Vec<String>> {
        let rows = artist_genre::Entity::find()
            .filter(artist_genre::Column::ArtistId.eq(artist_id))
            .find_also_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, genre)| genre.map(|g| g.name))
            .collect())
    }

    pub async fn attach_to_venue(&self, venue_id: i32, genre_ids: &[i32]) -> Result<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let rows = genre_ids.iter().map(|&genre_id| venue_genre::ActiveModel {
            venue_id: sea_orm::Set(venue_id),
            genre_id: sea_orm::Set(genre_id),
        });

        venue_genre::Entity::insert_many(rows)
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    pub async fn attach_to_artist(&self, artist_id: i32, genre_ids: &[i32]) -> Result<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let rows = genre_ids.iter().map(|&genre_id| artist_genre::ActiveModel {
            artist_id: sea_orm::Set(artist_id),
            genre_id: sea_orm::Set(genre_id),
        });

        artist_genre::Entity::insert_many(rows)
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }
}

/// A show joined with the names of both parties, for the shows listing.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ShowWithParties {
    pub id: i32,
    pub start_time: sea_orm::prelude::DateTimeWithTimeZone,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

pub struct ShowRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShowRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Shows booked at a venue, each with its performing artist.
    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<(show::Model, artist::Model)>> {
        let rows = show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .find_also_related(artist::Entity)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(show, artist)| artist.map(|a| (show, a)))
            .collect())
    }

    /// Shows performed by an artist, each with its venue.
    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<(show::Model, venue::Model)>> {
        let rows = show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .find_also_related(venue::Entity)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(show, venue)| venue.map(|v| (show, v)))
            .collect())
    }

    /// `(venue_id, start_time)` for every show, or only for shows at venues
    /// whose name contains `name_term` when one is given.
    pub async fn venue_start_times(
        &self,
        name_term: Option<&str>,
    ) -> Result<Vec<(i32, sea_orm::prelude::DateTimeWithTimeZone)>> {
        let mut query = show::Entity::find()
            .select_only()
            .column(show::Column::VenueId)
            .column(show::Column::StartTime);

        if let Some(term) = name_term {
            query = query
                .join(JoinType::InnerJoin, show::Relation::Venue.def())
                .filter(name_contains(venue::Column::Name, term));
        }

        Ok(query.into_tuple().all(self.db).await?)
    }

    /// `(artist_id, start_time)` for every show, or only for shows by artists
    /// whose name contains `name_term` when one is given.
    pub async fn artist_start_times(
        &self,
        name_term: Option<&str>,
    ) -> Result<Vec<(i32, sea_orm::prelude::DateTimeWithTimeZone)>> {
        let mut query = show::Entity::find()
            .select_only()
            .column(show::Column::ArtistId)
            .column(show::Column::StartTime);

        if let Some(term) = name_term {
            query = query
                .join(JoinType::InnerJoin, show::Relation::Artist.def())
                .filter(name_contains(artist::Column::Name, term));
        }

        Ok(query.into_tuple().all(self.db).await?)
    }

    pub async fn all_with_parties(&self) -> Result<Vec<ShowWithParties>> {
        Ok(show::Entity::find()
            .select_only()
            .column(show::Column::Id)
            .column(show::Column::StartTime)
            .column(show::Column::VenueId)
            .column(show::Column::ArtistId)
            .column_as(venue::Column::Name, "venue_name")
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .join(JoinType::InnerJoin, show::Relation::Artist.def())
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .into_model::<ShowWithParties>()
            .all(self.db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(show::Entity::find().count(self.db).await?)
    }

    /// Insert a show. A dangling artist or venue reference is reported as
    /// [`AppError::ReferentialIntegrity`] rather than a raw store error.
    pub async fn create(&self, show: show::ActiveModel) -> Result<show::Model> {
        show.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::ReferentialIntegrity("referenced artist or venue not found".to_string())
            }
            _ => AppError::Database(e),
        })
    }
}
