use reqwest::StatusCode;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

#[tokio::test]
async fn checkout_returns_the_redirect_target() {
    let app = TestApp::spawn().await;

    Mock::given(path("/checkout/preferences"))
        .and(method("POST"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pref_123",
            "init_point": "https://pay.test/redirect/pref_123",
        })))
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let payload = serde_json::json!({
        "items": [
            { "title": "Toaster", "unitPrice": 150.0, "quantity": 1 },
            // Quantity defaults to one when the storefront omits it
            { "title": "Honeymoon fund", "unitPrice": 50.0 },
        ],
        "name": "Ana",
        "email": "ana@test.com",
        "note": "Congratulations!",
    });

    let res = app
        .payment_checkout(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!("https://pay.test/redirect/pref_123", body["redirectUrl"]);
    assert_eq!("pref_123", body["referenceId"]);
}

#[tokio::test]
async fn checkout_accepts_the_snake_case_price_spelling() {
    let app = TestApp::spawn().await;

    Mock::given(path("/checkout/preferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pref_456",
            "init_point": "https://pay.test/redirect/pref_456",
        })))
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let payload = serde_json::json!({
        "items": [{ "title": "Toaster", "unit_price": 150.0, "quantity": 1 }],
        "name": "Ana",
        "email": "ana@test.com",
    });

    let res = app
        .payment_checkout(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn checkout_rejects_invalid_carts_locally() {
    let app = TestApp::spawn().await;

    // The gateway must never be called for an invalid cart
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.payment_server)
        .await;

    let test_cases = vec![
        (
            "empty cart",
            serde_json::json!({
                "items": [],
                "name": "Ana",
                "email": "ana@test.com",
            }),
        ),
        (
            "zero unit price",
            serde_json::json!({
                "items": [{ "title": "Toaster", "unitPrice": 0.0, "quantity": 1 }],
                "name": "Ana",
                "email": "ana@test.com",
            }),
        ),
        (
            "negative unit price",
            serde_json::json!({
                "items": [{ "title": "Toaster", "unitPrice": -5.0, "quantity": 1 }],
                "name": "Ana",
                "email": "ana@test.com",
            }),
        ),
        (
            "zero quantity",
            serde_json::json!({
                "items": [{ "title": "Toaster", "unitPrice": 150.0, "quantity": 0 }],
                "name": "Ana",
                "email": "ana@test.com",
            }),
        ),
        (
            "blank title",
            serde_json::json!({
                "items": [{ "title": "  ", "unitPrice": 150.0, "quantity": 1 }],
                "name": "Ana",
                "email": "ana@test.com",
            }),
        ),
        (
            "malformed payer email",
            serde_json::json!({
                "items": [{ "title": "Toaster", "unitPrice": 150.0, "quantity": 1 }],
                "name": "Ana",
                "email": "not an email",
            }),
        ),
    ];

    for (desc, payload) in test_cases {
        let res = app
            .payment_checkout(&payload)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );
    }
}

#[tokio::test]
async fn checkout_maps_gateway_failure_to_a_generic_500() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let payload = serde_json::json!({
        "items": [{ "title": "Toaster", "unitPrice": 150.0, "quantity": 1 }],
        "name": "Ana",
        "email": "ana@test.com",
    });

    let res = app
        .payment_checkout(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!("Payment could not be initiated", body["error"]);
    assert!(!body["error"].as_str().unwrap().contains("500"));
}
