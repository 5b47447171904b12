use std::future::{ready, Ready};

use actix_web::{dev, web, FromRequest, HttpRequest};

use secrecy::Secret;

use crate::error::RestError;

/// The configured administrative token.
/// NOTE: Must be registered with the application at startup
#[derive(Debug, Clone)]
pub struct AdminToken(Secret<String>);

impl AdminToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }

    fn matches(&self, candidate: &str) -> bool {
        use secrecy::ExposeSecret;

        !candidate.is_empty() && candidate == self.0.expose_secret()
    }
}

/// Request guard for administrative endpoints: extracts the `token` query
/// parameter and compares it against the configured admin token.
/// There is no account system behind this, a static token is the whole
/// authorization scheme.
#[derive(Debug)]
pub struct Administrator;

impl FromRequest for Administrator {
    type Error = RestError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        // NOTE: Must be registered with the application at startup
        let admin_token: &web::Data<AdminToken> = req
            .app_data()
            .expect("AdminToken not registered for application");

        let candidate = url::form_urlencoded::parse(req.query_string().as_bytes())
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned());

        let result = match candidate {
            Some(candidate) if admin_token.matches(&candidate) => Ok(Administrator),
            Some(_) => Err(RestError::Unauthorized("Invalid admin token".into())),
            None => Err(RestError::Unauthorized("Missing admin token".into())),
        };

        ready(result)
    }
}
