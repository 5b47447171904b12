use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::domain::{CompanionCount, EmailAddress, GuestName};

/// A validated first-time RSVP
#[derive(Debug)]
pub struct NewGuestResponse {
    pub name: GuestName,
    pub email: EmailAddress,
    pub companion_adults: CompanionCount,
    pub companion_children: CompanionCount,
    pub note: Option<String>,
    pub attending: bool,
}

/// A validated revision of an existing RSVP, keyed by email.
/// Name and email are immutable once stored, so neither appears here.
#[derive(Debug)]
pub struct GuestResponseChanges {
    pub email: EmailAddress,
    pub companion_adults: CompanionCount,
    pub companion_children: CompanionCount,
    pub note: Option<String>,
    pub attending: bool,
}

/// Stored guest response record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    /// Surrogate id, never exposed on the wire
    #[serde(skip_serializing)]
    pub id: Uuid,
    /// User supplied data, validated on the way in
    pub name: String,
    /// Normalized unique key
    pub email: String,
    pub companion_adults: i32,
    pub companion_children: i32,
    pub note: Option<String>,
    pub attending: bool,
    /// Creation and update timestamps.
    /// `created_at` never changes after the first insert
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
