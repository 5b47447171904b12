use actix_web::dev::HttpServiceFactory;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::Serialize;

use rsvp::export as csv_export;
use rsvp::repo::{GuestRepo, ListOrder};

use crate::auth::Administrator;
use crate::error::{RestError, RestResult};

const EXPORT_FILE_NAME: &str = "rsvp_list.csv";

#[derive(Debug, Serialize)]
struct ClearResponse {
    deleted: u64,
}

#[tracing::instrument(name = "Export all RSVPs as CSV", skip(repo))]
#[get("/export")]
async fn export(
    _admin: Administrator,
    repo: web::Data<dyn GuestRepo>,
) -> RestResult<impl Responder> {
    let records = repo.fetch_all(ListOrder::CreatedAsc).await?;
    if records.is_empty() {
        return Err(RestError::NotFound("No responses stored yet".into()));
    }

    let csv = csv_export::to_csv(&records)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.into())],
        })
        .body(csv))
}

#[tracing::instrument(name = "Clear all RSVPs", skip(repo))]
#[post("/clear")]
async fn clear(
    _admin: Administrator,
    repo: web::Data<dyn GuestRepo>,
) -> RestResult<impl Responder> {
    let deleted = repo.delete_all().await?;

    tracing::info!("Cleared {} stored responses", deleted);

    Ok(web::Json(ClearResponse { deleted }))
}

/// Administrative endpoints, guarded by the static admin token
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/admin").service(export).service(clear)
}
