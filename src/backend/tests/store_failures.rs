#![cfg(feature = "mock")]

use actix_web::{App, http::StatusCode, test, web};
use anyhow::anyhow;
use portal_setup::{
    api::Api,
    config::PortalConfig,
    services::store::{ConnectionState, MockCredentialStore},
    static_files,
};

async fn call(store: MockCredentialStore, req: test::TestRequest) -> StatusCode {
    let api = Api::new(store, PortalConfig::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(static_files()))
            .configure(Api::<MockCredentialStore>::configure),
    )
    .await;

    test::call_service(&app, req.to_request()).await.status()
}

#[actix_web::test]
async fn save_fails_when_store_fails() {
    let mut store = MockCredentialStore::default();
    store
        .expect_store()
        .times(1)
        .returning(|_| Box::pin(async { Err(anyhow!("flash write failed")) }));

    let req = test::TestRequest::post()
        .uri("/save")
        .set_form([("ssid", "Home"), ("password", "longenough1")]);

    assert_eq!(call(store, req).await, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn rejected_save_never_reaches_store() {
    let mut store = MockCredentialStore::default();
    store.expect_store().never();

    let req = test::TestRequest::post()
        .uri("/save")
        .set_form([("ssid", "Home"), ("password", "short")]);

    assert_eq!(call(store, req).await, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn status_is_read_from_store() {
    let mut store = MockCredentialStore::default();
    store.expect_connection_state().returning(|| {
        Box::pin(async {
            Ok(ConnectionState::Connecting {
                ssid: "Office".to_string(),
            })
        })
    });

    let req = test::TestRequest::get().uri("/status");
    assert_eq!(call(store, req).await, StatusCode::OK);
}

#[actix_web::test]
async fn reset_fails_when_store_fails() {
    let mut store = MockCredentialStore::default();
    store
        .expect_reset()
        .returning(|| Box::pin(async { Err(anyhow!("flash erase failed")) }));

    let req = test::TestRequest::post().uri("/reset");
    assert_eq!(call(store, req).await, StatusCode::INTERNAL_SERVER_ERROR);
}
