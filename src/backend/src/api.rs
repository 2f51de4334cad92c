use crate::{
    config::PortalConfig,
    services::{
        captive::{self, CaptiveResponse},
        credentials::{SaveForm, WifiCredentials},
        rate_limit::SaveRateLimiter,
        store::CredentialStore,
    },
};
use actix_web::{
    HttpRequest, HttpResponse, Responder,
    http::header::{self, ContentType},
    web,
};
use log::{debug, error, warn};
use portal_setup_core::{SAVE_ENDPOINT, SUCCESS_PAGE};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};

pub type StaticResources = HashMap<&'static str, static_files::Resource>;

const NO_CACHE: (header::HeaderName, &str) = (header::CACHE_CONTROL, "no-cache");
const NO_STORE: (header::HeaderName, &str) =
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate");

const WPAD_PAC: &str = "function FindProxyForURL(url,host){return\"DIRECT\";}";

/// Paths operating systems poll to detect a captive portal
pub const PROBE_PATHS: [&str; 5] = [
    "/generate_204",
    "/gen_204",
    "/hotspot-detect.html",
    "/canonical.html",
    "/success.txt",
];

#[derive(Clone)]
pub struct Api<Store>
where
    Store: CredentialStore,
{
    pub store: Store,
    pub portal: PortalConfig,
    pub rate_limiter: Arc<Mutex<SaveRateLimiter>>,
}

impl<Store> Api<Store>
where
    Store: CredentialStore + 'static,
{
    pub fn new(store: Store, portal: PortalConfig) -> Self {
        Api {
            store,
            portal,
            rate_limiter: Arc::default(),
        }
    }

    /// Registers every portal route, including the captive fallback
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(Self::index))
            .route("/redirect", web::get().to(Self::index))
            .route(SUCCESS_PAGE, web::get().to(Self::static_page))
            .route("/style.css", web::get().to(Self::static_page))
            .route("/portal.js", web::get().to(Self::static_page))
            .route("/pkg/{file}", web::get().to(Self::static_page))
            .route(SAVE_ENDPOINT, web::post().to(Self::save))
            .route("/status", web::get().to(Self::status))
            .route("/reset", web::post().to(Self::reset))
            .route("/connecttest.txt", web::get().to(Self::connect_test))
            .route("/ncsi.txt", web::route().to(Self::ncsi))
            .route("/wpad.dat", web::get().to(Self::wpad));

        for path in PROBE_PATHS {
            cfg.route(path, web::route().to(Self::probe));
        }

        cfg.default_service(web::route().to(Self::fallback));
    }

    pub async fn index(
        req: HttpRequest,
        api: web::Data<Self>,
        static_resources: web::Data<StaticResources>,
    ) -> HttpResponse {
        debug!("index() called");

        let outcome = captive::check_host(&api.portal, host_header(&req));
        Self::captive_response(outcome, &static_resources)
    }

    pub async fn static_page(
        req: HttpRequest,
        static_resources: web::Data<StaticResources>,
    ) -> HttpResponse {
        let name = req.path().trim_start_matches('/');
        debug!("static_page() called: {name}");

        serve_resource(&static_resources, name, false)
    }

    pub async fn save(form: Option<web::Form<SaveForm>>, api: web::Data<Self>) -> HttpResponse {
        debug!("save() called");

        let allowed = match api.rate_limiter.lock() {
            Ok(mut limiter) => limiter.check(Instant::now()),
            Err(_) => {
                error!("save failed: rate limiter lock poisoned");
                return HttpResponse::InternalServerError().finish();
            }
        };

        if let Err(e) = allowed {
            warn!("save rejected: {e}");
            return HttpResponse::TooManyRequests()
                .content_type(ContentType::plaintext())
                .body(e.to_string());
        }

        let form = form.map(web::Form::into_inner).unwrap_or_default();

        let credentials = match WifiCredentials::try_from(form) {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!("save rejected: {e}");
                return HttpResponse::BadRequest()
                    .content_type(ContentType::plaintext())
                    .body(e.to_string());
            }
        };

        if let Err(e) = api.store.store(credentials).await {
            error!("save failed: {e:#}");
            return HttpResponse::InternalServerError().body(e.to_string());
        }

        HttpResponse::Ok()
            .insert_header(NO_CACHE)
            .json(json!({ "status": "connecting" }))
    }

    pub async fn status(api: web::Data<Self>) -> HttpResponse {
        debug!("status() called");

        match api.store.connection_state().await {
            Ok(state) => HttpResponse::Ok().insert_header(NO_CACHE).json(state),
            Err(e) => {
                error!("status failed: {e:#}");
                HttpResponse::InternalServerError().body(e.to_string())
            }
        }
    }

    pub async fn reset(api: web::Data<Self>) -> HttpResponse {
        debug!("reset() called");

        match api.store.reset().await {
            Ok(()) => HttpResponse::Ok()
                .insert_header(NO_CACHE)
                .json(json!({ "status": "reset" })),
            Err(e) => {
                error!("reset failed: {e:#}");
                HttpResponse::InternalServerError().body(e.to_string())
            }
        }
    }

    pub async fn probe(req: HttpRequest, api: web::Data<Self>) -> HttpResponse {
        debug!("probe() called: {}", req.path());

        HttpResponse::Found()
            .append_header((header::LOCATION, captive::probe_location(&api.portal)))
            .content_type(ContentType::plaintext())
            .finish()
    }

    pub async fn connect_test() -> impl Responder {
        HttpResponse::Ok()
            .insert_header(NO_STORE)
            .content_type(ContentType::plaintext())
            .body("Microsoft Connect Test")
    }

    pub async fn ncsi() -> impl Responder {
        HttpResponse::Ok()
            .insert_header(NO_CACHE)
            .content_type(ContentType::plaintext())
            .body("Microsoft NCSI")
    }

    pub async fn wpad() -> impl Responder {
        HttpResponse::Ok()
            .content_type("application/x-ns-proxy-autoconfig")
            .body(WPAD_PAC)
    }

    pub async fn fallback(
        req: HttpRequest,
        api: web::Data<Self>,
        static_resources: web::Data<StaticResources>,
    ) -> HttpResponse {
        let uri = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path(), |target| target.as_str());

        let outcome = captive::classify_unrouted(&api.portal, uri, host_header(&req));
        Self::captive_response(outcome, &static_resources)
    }

    fn captive_response(
        outcome: CaptiveResponse,
        static_resources: &StaticResources,
    ) -> HttpResponse {
        match outcome {
            CaptiveResponse::ServePortal => serve_resource(static_resources, "index.html", true),
            CaptiveResponse::Redirect(location) => HttpResponse::Found()
                .append_header((header::LOCATION, location))
                .content_type(ContentType::html())
                .finish(),
            CaptiveResponse::BadRequest => HttpResponse::BadRequest()
                .content_type(ContentType::plaintext())
                .finish(),
            CaptiveResponse::NoContent => HttpResponse::NoContent().finish(),
        }
    }
}

fn host_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
}

fn serve_resource(static_resources: &StaticResources, name: &str, no_cache: bool) -> HttpResponse {
    let Some(resource) = static_resources.get(name) else {
        error!("{name} not found in embedded resources");
        return HttpResponse::NotFound().finish();
    };

    let mut response = HttpResponse::Ok();
    if no_cache {
        response.insert_header(NO_CACHE);
    }

    response
        .content_type(resource.mime_type)
        .body(resource.data.to_vec())
}
