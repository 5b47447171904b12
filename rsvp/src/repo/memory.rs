use std::collections::HashMap;

use uuid::Uuid;

use chrono::Utc;

use tokio::sync::RwLock;

use crate::domain::EmailAddress;
use crate::error::{Error, Result};
use crate::model::{GuestResponse, GuestResponseChanges, NewGuestResponse};

use super::{GuestRepo, ListOrder};

/// In-memory guest repository backing the test suites.
/// The write lock spans the whole check-and-insert, so concurrent Creates
/// for the same email cannot both pass the existence check.
#[derive(Debug, Default)]
pub struct MemoryGuestRepo {
    records: RwLock<HashMap<String, GuestResponse>>,
}

impl MemoryGuestRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl GuestRepo for MemoryGuestRepo {
    async fn insert(&self, new_response: &NewGuestResponse) -> Result<GuestResponse> {
        let mut records = self.records.write().await;

        if records.contains_key(new_response.email.as_ref()) {
            return Err(Error::DuplicateEmail);
        }

        let now = Utc::now();
        let record = GuestResponse {
            id: Uuid::new_v4(),
            name: new_response.name.as_ref().to_string(),
            email: new_response.email.as_ref().to_string(),
            companion_adults: new_response.companion_adults.get(),
            companion_children: new_response.companion_children.get(),
            note: new_response.note.clone(),
            attending: new_response.attending,
            created_at: now,
            updated_at: now,
        };
        records.insert(record.email.clone(), record.clone());

        Ok(record)
    }

    async fn update(&self, changes: &GuestResponseChanges) -> Result<GuestResponse> {
        let mut records = self.records.write().await;

        let record = records
            .get_mut(changes.email.as_ref())
            .ok_or(Error::UnknownEmail)?;

        record.companion_adults = changes.companion_adults.get();
        record.companion_children = changes.companion_children.get();
        record.note = changes.note.clone();
        record.attending = changes.attending;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn fetch_by_email(&self, email: &EmailAddress) -> Result<Option<GuestResponse>> {
        let records = self.records.read().await;

        Ok(records.get(email.as_ref()).cloned())
    }

    async fn fetch_all(&self, order: ListOrder) -> Result<Vec<GuestResponse>> {
        let records = self.records.read().await;

        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|record| record.created_at);
        if let ListOrder::CreatedDesc = order {
            all.reverse();
        }

        Ok(all)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut records = self.records.write().await;

        let deleted = records.len() as u64;
        records.clear();

        Ok(deleted)
    }
}
