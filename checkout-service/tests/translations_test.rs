mod common;

use common::TestApp;
use serde_json::Value;

async fn get_json(app: &TestApp, path: &str) -> Value {
    let response = app
        .client
        .get(format!("{}{}", app.address, path))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
async fn lists_supported_languages() {
    let app = TestApp::spawn().await;

    let body = get_json(&app, "/api/translations").await;

    assert_eq!(
        body["languages"],
        serde_json::json!([
            { "code": "en", "name": "English", "nativeName": "English" },
            { "code": "uk", "name": "Ukrainian", "nativeName": "Українська" }
        ])
    );
}

#[tokio::test]
async fn serves_ukrainian_table_by_alias() {
    let app = TestApp::spawn().await;

    let body = get_json(&app, "/api/translations/UA").await;

    assert_eq!(body["code"], "uk");
    assert_eq!(body["translations"]["checkout.placeOrder"], "Розмістити замовлення");
}

#[tokio::test]
async fn unknown_language_falls_back_to_english() {
    let app = TestApp::spawn().await;

    let body = get_json(&app, "/api/translations/de").await;

    assert_eq!(body["code"], "en");
    assert_eq!(body["translations"]["cart.title"], "Shopping Cart");
}
