use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, put, web, HttpResponse, Responder};

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;

use rsvp::domain::EmailAddress;
use rsvp::model::{GuestResponse, GuestResponseChanges, NewGuestResponse};
use rsvp::repo::{GuestRepo, ListOrder};
use rsvp::summary;

use crate::error::RestResult;
use crate::notify::{Notifier, RsvpEvent};

const RECENT_MESSAGE_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpForm {
    name: String,
    email: String,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    companion_adults: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    companion_children: i64,
    note: Option<String>,
    attending: bool,
}

impl TryFrom<RsvpForm> for NewGuestResponse {
    type Error = rsvp::error::Error;

    fn try_from(form: RsvpForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.parse()?,
            email: form.email.parse()?,
            companion_adults: form.companion_adults.try_into()?,
            companion_children: form.companion_children.try_into()?,
            note: normalize_note(form.note),
            attending: form.attending,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpUpdateForm {
    email: String,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    companion_adults: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    companion_children: i64,
    note: Option<String>,
    attending: bool,
}

impl TryFrom<RsvpUpdateForm> for GuestResponseChanges {
    type Error = rsvp::error::Error;

    fn try_from(form: RsvpUpdateForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: form.email.parse()?,
            companion_adults: form.companion_adults.try_into()?,
            companion_children: form.companion_children.try_into()?,
            note: normalize_note(form.note),
            attending: form.attending,
        })
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    email: String,
}

#[derive(Debug, Serialize)]
struct LookupResponse {
    exists: bool,
    // A flattened `None` contributes no keys at all
    #[serde(flatten)]
    record: Option<GuestResponse>,
}

#[tracing::instrument(name = "Look up an RSVP by email", skip(repo))]
#[get("")]
async fn lookup(
    query: web::Query<LookupQuery>,
    repo: web::Data<dyn GuestRepo>,
) -> RestResult<impl Responder> {
    let email: EmailAddress = query.email.parse()?;

    let record = repo.fetch_by_email(&email).await?;

    Ok(web::Json(LookupResponse {
        exists: record.is_some(),
        record,
    }))
}

#[tracing::instrument(name = "Create an RSVP", skip(repo, notifier))]
#[post("")]
async fn create(
    form: web::Json<RsvpForm>,
    repo: web::Data<dyn GuestRepo>,
    notifier: web::Data<Notifier>,
) -> RestResult<impl Responder> {
    let new_response: NewGuestResponse = form.into_inner().try_into()?;

    let record = repo.insert(&new_response).await?;

    notify_after_write(repo.get_ref(), notifier.get_ref(), RsvpEvent::Created, &record).await;

    Ok(HttpResponse::Created().json(record))
}

#[tracing::instrument(name = "Update an RSVP", skip(repo, notifier))]
#[put("")]
async fn update(
    form: web::Json<RsvpUpdateForm>,
    repo: web::Data<dyn GuestRepo>,
    notifier: web::Data<Notifier>,
) -> RestResult<impl Responder> {
    let changes: GuestResponseChanges = form.into_inner().try_into()?;

    let record = repo.update(&changes).await?;

    notify_after_write(repo.get_ref(), notifier.get_ref(), RsvpEvent::Updated, &record).await;

    Ok(HttpResponse::Ok().json(record))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuestMessage {
    name: String,
    note: String,
    created_at: DateTime<Utc>,
}

#[tracing::instrument(name = "List recent guest messages", skip(repo))]
#[get("/messages")]
async fn messages(repo: web::Data<dyn GuestRepo>) -> RestResult<impl Responder> {
    let records = repo.fetch_all(ListOrder::CreatedDesc).await?;

    let messages: Vec<GuestMessage> = records
        .into_iter()
        .filter(|record| record.attending)
        .filter_map(|record| {
            let note = record.note.filter(|note| !note.trim().is_empty())?;
            Some(GuestMessage {
                name: record.name,
                note,
                created_at: record.created_at,
            })
        })
        .take(RECENT_MESSAGE_LIMIT)
        .collect();

    Ok(web::Json(messages))
}

/// Recompute the summary from the full record set and fire both
/// notifications. Best-effort: outcomes are logged, the committed write
/// stands regardless.
async fn notify_after_write(
    repo: &dyn GuestRepo,
    notifier: &Notifier,
    event: RsvpEvent,
    record: &GuestResponse,
) {
    let summary = match repo.fetch_all(ListOrder::CreatedAsc).await {
        Ok(records) => summary::summarize(&records),
        Err(error) => {
            tracing::warn!("Failed to load records for the summary: {}", error);
            return;
        }
    };

    let couple = notifier.couple_summary(event, record, &summary).await;
    let guest = notifier.guest_acknowledgment(record).await;
    tracing::debug!(?couple, ?guest, "Notification dispatch outcomes");
}

/// Guest RSVP endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/rsvp")
        .service(messages)
        .service(lookup)
        .service(create)
        .service(update)
}
