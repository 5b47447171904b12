use reqwest::StatusCode;

use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{RsvpPayload, TestApp};

#[tokio::test]
async fn export_requires_a_valid_token() {
    let app = TestApp::spawn().await;

    let res = app
        .admin_export(None)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    let res = app
        .admin_export(Some("wrong-token"))
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());
}

#[tokio::test]
async fn export_of_an_empty_store_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .admin_export(Some(&app.admin_token))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
}

#[tokio::test]
async fn export_round_trips_the_stored_records() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let mut ana = RsvpPayload::valid("Ana", "ana@test.com");
    ana.note = Some("Hello, with a comma".into());

    let mut leo = RsvpPayload::valid("Leo", "leo@test.com");
    leo.companion_adults = Some(2);
    leo.companion_children = Some(1);
    leo.attending = Some(false);

    for payload in [&ana, &leo] {
        let res = app
            .rsvp_create(payload)
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, res.status());
    }

    let res = app
        .admin_export(Some(&app.admin_token))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let content_disposition = res
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_disposition.contains("attachment"));

    let body = res.text().await.expect("Failed to read response body");

    assert_eq!(
        Some("Name,Email,CompanionAdults,CompanionChildren,Note,Attending"),
        body.lines().next()
    );

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("Failed to parse exported CSV");

    assert_eq!(2, rows.len());
    // Oldest first
    assert_eq!("Ana", &rows[0][0]);
    assert_eq!("ana@test.com", &rows[0][1]);
    assert_eq!("0", &rows[0][2]);
    assert_eq!("0", &rows[0][3]);
    assert_eq!("Hello, with a comma", &rows[0][4]);
    assert_eq!("Yes", &rows[0][5]);

    assert_eq!("Leo", &rows[1][0]);
    assert_eq!("leo@test.com", &rows[1][1]);
    assert_eq!("2", &rows[1][2]);
    assert_eq!("1", &rows[1][3]);
    assert_eq!("", &rows[1][4]);
    assert_eq!("No", &rows[1][5]);
}

#[tokio::test]
async fn clear_requires_a_valid_token() {
    let app = TestApp::spawn().await;

    let res = app
        .admin_clear(None)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    let res = app
        .admin_clear(Some("wrong-token"))
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());
}

#[tokio::test]
async fn clear_deletes_every_record_and_reports_the_prior_count() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    for payload in [
        RsvpPayload::valid("Ana", "ana@test.com"),
        RsvpPayload::valid("Leo", "leo@test.com"),
    ] {
        let res = app
            .rsvp_create(&payload)
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, res.status());
    }

    let res = app
        .admin_clear(Some(&app.admin_token))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(2, body["deleted"]);

    let res = app
        .rsvp_lookup("ana@test.com")
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(false, body["exists"]);

    let res = app
        .admin_export(Some(&app.admin_token))
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, res.status());

    let res = app
        .admin_clear(Some(&app.admin_token))
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(0, body["deleted"]);
}
