use actix_web::{
    App,
    dev::ServiceResponse,
    http::{StatusCode, header},
    test, web,
};
use portal_setup::{
    api::Api, config::PortalConfig, services::store::MemoryCredentialStore, static_files,
};
use serde_json::{Value, json};

const PORTAL_HOST: &str = "192.168.4.1";

type PortalApi = Api<MemoryCredentialStore>;

async fn send(api: &PortalApi, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api.clone()))
            .app_data(web::Data::new(static_files()))
            .configure(PortalApi::configure),
    )
    .await;

    test::call_service(&app, req.to_request()).await
}

fn new_api() -> PortalApi {
    PortalApi::new(MemoryCredentialStore::default(), PortalConfig::default())
}

fn save_request(form: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/save")
        .insert_header((header::HOST, PORTAL_HOST))
        .set_form(form)
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn root_on_portal_host_serves_setup_page() {
    let api = new_api();
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::HOST, PORTAL_HOST));

    let resp = send(&api, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-cache");

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("id=\"scanBtn\""));
    assert!(body.contains("action=\"/save\""));
}

#[actix_web::test]
async fn root_on_foreign_host_redirects_to_portal() {
    let api = new_api();
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::HOST, "captive.apple.com"));

    let resp = send(&api, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "http://192.168.4.1");
}

#[actix_web::test]
async fn connectivity_probes_redirect_with_any_method() {
    let api = new_api();

    for path in ["/generate_204", "/gen_204", "/hotspot-detect.html"] {
        let resp = send(&api, test::TestRequest::get().uri(path)).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{path}");
        assert_eq!(location(&resp), "http://192.168.4.1/", "{path}");
    }

    let resp = send(&api, test::TestRequest::post().uri("/success.txt")).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn windows_probes_are_answered_directly() {
    let api = new_api();

    let resp = send(&api, test::TestRequest::get().uri("/connecttest.txt")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Microsoft Connect Test");

    let resp = send(&api, test::TestRequest::get().uri("/ncsi.txt")).await;
    assert_eq!(test::read_body(resp).await, "Microsoft NCSI");

    let resp = send(&api, test::TestRequest::get().uri("/wpad.dat")).await;
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/x-ns-proxy-autoconfig"
    );
    assert_eq!(
        test::read_body(resp).await,
        "function FindProxyForURL(url,host){return\"DIRECT\";}"
    );
}

#[actix_web::test]
async fn unrouted_noise_gets_no_content() {
    let api = new_api();
    let req = test::TestRequest::get()
        .uri("/favicon.ico")
        .insert_header((header::HOST, PORTAL_HOST));

    let resp = send(&api, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn unrouted_oversized_uri_is_rejected() {
    let api = new_api();
    let req = test::TestRequest::get()
        .uri(&format!("/{}", "x".repeat(300)))
        .insert_header((header::HOST, PORTAL_HOST));

    let resp = send(&api, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn setup_page_loads_core_shell() {
    let api = new_api();
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::HOST, PORTAL_HOST));

    let body = test::read_body(send(&api, req).await).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("src=\"/portal.js\""));

    let resp = send(&api, test::TestRequest::get().uri("/portal.js")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let script = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(script.contains("/pkg/portal_setup_core.js"));
    assert!(script.contains("resolve_delay"));
}

#[actix_web::test]
async fn missing_core_package_is_not_found() {
    let api = new_api();
    let resp = send(
        &api,
        test::TestRequest::get().uri("/pkg/does_not_exist.wasm"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn success_page_is_served() {
    let api = new_api();
    let resp = send(&api, test::TestRequest::get().uri("/success.html")).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn save_accepts_valid_credentials_and_reports_status() {
    let api = new_api();

    let resp = send(
        &api,
        save_request(&[("ssid", " Home Net "), ("password", "longenough1")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "connecting"}));

    let resp = send(&api, test::TestRequest::get().uri("/status")).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"state": "connecting", "ssid": "Home Net"}));

    let resp = send(&api, test::TestRequest::post().uri("/reset")).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "reset"}));

    let resp = send(&api, test::TestRequest::get().uri("/status")).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"state": "idle"}));
}

#[actix_web::test]
async fn save_reports_missing_parameters() {
    let api = new_api();

    let resp = send(&api, save_request(&[("ssid", "Home")])).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Missing parameters");
}

#[actix_web::test]
async fn save_rejects_invalid_formats() {
    let api = new_api();
    let long_ssid = "a".repeat(33);

    let resp = send(
        &api,
        save_request(&[("ssid", long_ssid.as_str()), ("password", "longenough1")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Invalid SSID format");

    // a fresh api so the two second spacing does not kick in
    let api = new_api();
    let resp = send(&api, save_request(&[("ssid", "Home"), ("password", "short")])).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Invalid password format");
}

#[actix_web::test]
async fn save_is_rate_limited() {
    let api = new_api();
    let form = [("ssid", "Home"), ("password", "longenough1")];

    let resp = send(&api, save_request(&form)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&api, save_request(&form)).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        test::read_body(resp).await,
        "Too many requests. Please wait."
    );
}
