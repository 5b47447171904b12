use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let res = app.health_check().await.expect("Failed to execute request");

    assert!(res.status().is_success());
}
