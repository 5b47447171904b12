use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use rsvp::repo::{GuestRepo, PgGuestRepo};

use server::auth::AdminToken;
use server::notify::Notifier;
use server::settings::Settings;
use server::{app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().expect("Failed to load settings");

    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let pool = PgPool::connect_with(settings.database.with_db()).await?;
    let repo: Arc<dyn GuestRepo> = Arc::new(PgGuestRepo::new(pool));

    let notifier = Notifier::new(
        settings.email.client()?,
        settings.wedding.couple_name().to_string(),
        settings.wedding.couple_recipients()?,
        settings.wedding.gift_page_url()?,
    );
    let payment_client = settings.payment.client()?;
    let admin_token = AdminToken::new(settings.app.admin_token());

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, repo, notifier, payment_client, admin_token)?
        .await
        .context("Failed to run app")
}
