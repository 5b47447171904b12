use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use rsvp::client::PaymentClient;
use rsvp::repo::GuestRepo;

use crate::auth::AdminToken;
use crate::controller;
use crate::notify::Notifier;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    repo: Arc<dyn GuestRepo>,
    notifier: Notifier,
    payment_client: PaymentClient,
    admin_token: AdminToken,
) -> anyhow::Result<Server> {
    // Wrap application data
    let repo: web::Data<dyn GuestRepo> = web::Data::from(repo);
    let notifier = web::Data::new(notifier);
    let payment_client = web::Data::new(payment_client);
    let admin_token = web::Data::new(admin_token);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(repo.clone())
            .app_data(notifier.clone())
            .app_data(payment_client.clone())
            .app_data(admin_token.clone())
            .service(health_check)
            .service(controller::rsvp::scope())
            .service(controller::admin::scope())
            .service(controller::payment::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
