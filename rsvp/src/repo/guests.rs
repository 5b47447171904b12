use uuid::Uuid;

use chrono::Utc;

use sqlx::PgPool;

use crate::domain::EmailAddress;
use crate::error::{Error, Result};
use crate::model::{GuestResponse, GuestResponseChanges, NewGuestResponse};

/// Listing order for stored responses.
#[derive(Debug, Clone, Copy)]
pub enum ListOrder {
    /// Oldest first; used for export and for the summary
    CreatedAsc,
    /// Newest first; used for the recent-messages view
    CreatedDesc,
}

/// Guest repository trait, implemented once per backing store.
/// NOTE: Object-safe on purpose so the HTTP layer can run against any store
/// TODO: Swap async-trait for std async traits once dyn support lands
#[async_trait::async_trait]
pub trait GuestRepo: Send + Sync {
    /// Insert a first-time response. Fails with `DuplicateEmail` if a
    /// record already exists for the normalized email.
    async fn insert(&self, new_response: &NewGuestResponse) -> Result<GuestResponse>;

    /// Overwrite the mutable fields of an existing response and refresh
    /// `updated_at`. Fails with `UnknownEmail` if no record exists.
    async fn update(&self, changes: &GuestResponseChanges) -> Result<GuestResponse>;

    /// Fetch a single response by its normalized email
    async fn fetch_by_email(&self, email: &EmailAddress) -> Result<Option<GuestResponse>>;

    /// Fetch every stored response in the requested order
    async fn fetch_all(&self, order: ListOrder) -> Result<Vec<GuestResponse>>;

    /// Delete every stored response, returning the number removed
    async fn delete_all(&self) -> Result<u64>;
}

/// Postgres guest repository
#[derive(Debug)]
pub struct PgGuestRepo {
    pool: PgPool,
}

impl PgGuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GuestRepo for PgGuestRepo {
    #[tracing::instrument(name = "Insert guest response", skip(self))]
    async fn insert(&self, new_response: &NewGuestResponse) -> Result<GuestResponse> {
        // The unique constraint on email makes check-and-insert one atomic
        // unit: the loser of a concurrent duplicate insert gets no row back.
        let inserted = sqlx::query_as::<_, GuestResponse>(
            "insert into guests \
                (id, name, email, companion_adults, companion_children, note, attending, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             on conflict (email) do nothing \
             returning *",
        )
        .bind(Uuid::new_v4())
        .bind(new_response.name.as_ref())
        .bind(new_response.email.as_ref())
        .bind(new_response.companion_adults.get())
        .bind(new_response.companion_children.get())
        .bind(new_response.note.as_deref())
        .bind(new_response.attending)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or(Error::DuplicateEmail)
    }

    #[tracing::instrument(name = "Update guest response", skip(self))]
    async fn update(&self, changes: &GuestResponseChanges) -> Result<GuestResponse> {
        let updated = sqlx::query_as::<_, GuestResponse>(
            "update guests \
             set companion_adults=$2, companion_children=$3, note=$4, attending=$5, updated_at=$6 \
             where email=$1 \
             returning *",
        )
        .bind(changes.email.as_ref())
        .bind(changes.companion_adults.get())
        .bind(changes.companion_children.get())
        .bind(changes.note.as_deref())
        .bind(changes.attending)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(Error::UnknownEmail)
    }

    #[tracing::instrument(name = "Fetch guest response by email", skip(self))]
    async fn fetch_by_email(&self, email: &EmailAddress) -> Result<Option<GuestResponse>> {
        let record = sqlx::query_as::<_, GuestResponse>("select * from guests where email=$1")
            .bind(email.as_ref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(name = "Fetch all guest responses", skip(self))]
    async fn fetch_all(&self, order: ListOrder) -> Result<Vec<GuestResponse>> {
        let query = match order {
            ListOrder::CreatedAsc => "select * from guests order by created_at asc",
            ListOrder::CreatedDesc => "select * from guests order by created_at desc",
        };

        let records = sqlx::query_as::<_, GuestResponse>(query)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    #[tracing::instrument(name = "Delete all guest responses", skip(self))]
    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("delete from guests").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
