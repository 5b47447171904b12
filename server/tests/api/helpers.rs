use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use rand::{distributions::Alphanumeric, Rng};

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde::Serialize;

use url::Url;

use wiremock::MockServer;

use rsvp::client::{EmailClient, PaymentClient};
use rsvp::repo::{GuestRepo, MemoryGuestRepo};

use server::app;
use server::auth::AdminToken;
use server::notify::Notifier;

pub const GIFT_PAGE_URL: &str = "https://example.wedding/#gifts";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_adults: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_children: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attending: Option<bool>,
}

impl RsvpPayload {
    pub fn valid(name: &str, email: &str) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            companion_adults: Some(0),
            companion_children: Some(0),
            note: None,
            attending: Some(true),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
    pub payment_server: MockServer,
    pub admin_token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;
        let payment_server = MockServer::start().await;

        let email_client = {
            let sender = "rsvp@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = Secret::new("TestAuthorization".to_string());
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };

        let payment_client = {
            let api_base_url =
                Url::parse(&payment_server.uri()).expect("Failed to parse mock server uri");
            let api_access_token = Secret::new("TestAccessToken".to_string());
            let api_timeout = Duration::from_secs(2);

            PaymentClient::new(api_timeout, api_base_url, api_access_token)
                .expect("Failed to create payment client")
        };

        let notifier = Notifier::new(
            Some(email_client),
            "Ana & Leo".into(),
            vec!["couple@test.com"
                .parse()
                .expect("Failed to parse couple recipient address")],
            Url::parse(GIFT_PAGE_URL).expect("Failed to parse gift page URL"),
        );

        let admin_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();

        let repo: Arc<dyn GuestRepo> = Arc::new(MemoryGuestRepo::new());

        let server = app::run(
            listener,
            repo,
            notifier,
            payment_client,
            AdminToken::new(Secret::new(admin_token.clone())),
        )
        .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
            payment_server,
            admin_token,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn rsvp_create(&self, payload: &RsvpPayload) -> reqwest::Result<Response> {
        self.request(Method::POST, "rsvp").json(payload).send().await
    }

    pub async fn rsvp_update(&self, payload: &RsvpPayload) -> reqwest::Result<Response> {
        self.request(Method::PUT, "rsvp").json(payload).send().await
    }

    pub async fn rsvp_lookup(&self, email: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, "rsvp")
            .query(&[("email", email)])
            .send()
            .await
    }

    pub async fn rsvp_messages(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "rsvp/messages").send().await
    }

    pub async fn admin_export(&self, token: Option<&str>) -> reqwest::Result<Response> {
        let req = self.request(Method::GET, "admin/export");
        let req = match token {
            Some(token) => req.query(&[("token", token)]),
            None => req,
        };
        req.send().await
    }

    pub async fn admin_clear(&self, token: Option<&str>) -> reqwest::Result<Response> {
        let req = self.request(Method::POST, "admin/clear");
        let req = match token {
            Some(token) => req.query(&[("token", token)]),
            None => req,
        };
        req.send().await
    }

    pub async fn payment_checkout(
        &self,
        payload: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, "payment/checkout")
            .json(payload)
            .send()
            .await
    }
}
