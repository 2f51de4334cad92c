use actix_web::{
    App, HttpServer,
    web::{self, Data},
};
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{debug, error, info};
use portal_setup::{
    api::Api,
    config::AppConfig,
    services::store::MemoryCredentialStore,
    static_files,
};
use std::io::Write;
use tokio::signal::unix::{SignalKind, signal};

const FORM_LIMIT_BYTES: usize = 1024;

type PortalApi = Api<MemoryCredentialStore>;

#[actix_web::main]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize();

    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    let config = AppConfig::get();
    let api = PortalApi::new(MemoryCredentialStore::default(), config.portal.clone());
    let address = (config.server.bind_address, config.server.port);

    info!(
        "starting portal on {}:{} for {}",
        address.0,
        address.1,
        config.portal.origin()
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(api.clone()))
            .app_data(Data::new(static_files()))
            .app_data(web::FormConfig::default().limit(FORM_LIMIT_BYTES))
            .configure(PortalApi::configure)
    })
    .bind(address)
    .context("failed to bind server")?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => debug!("ctrl-c received"),
        _ = sigterm.recv() => debug!("SIGTERM received"),
        result = server_task => match result {
            Ok(Ok(())) => debug!("server stopped normally"),
            Ok(Err(e)) => error!("server stopped with error: {e}"),
            Err(e) => error!("server task panicked: {e}"),
        },
    }

    info!("shutting down");
    server_handle.stop(true).await;
    info!("shutdown complete");

    Ok(())
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!(
        "module version: {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_SHORT_REV")
    );
}
