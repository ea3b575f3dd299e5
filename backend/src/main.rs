mod config;
mod db;
mod job_controller;
mod notifier;
mod services;

use crate::job_controller::save_guard::SaveGuard;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let settings = config::Settings::from_env();

    db::init(&settings.db_path).map_err(io::Error::other)?;

    // Initialize job controller state
    let (tx, rx) = mpsc::channel(100);
    let jobs_state = JobsState {
        jobs: Arc::new(RwLock::new(HashMap::new())),
        tx,
    };

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    let save_guard = SaveGuard::new();
    let bind_addr = (settings.host.clone(), settings.port);

    info!(
        "Server running at http://{}:{} (db: {})",
        settings.host, settings.port, settings.db_path
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(save_guard.clone()))
            .app_data(web::Data::new(notifier::LogNotifier))
            .service(services::templates::configure_routes())
            .service(services::assets::configure_routes())
            .service(services::matrices::configure_routes())
    })
    .bind(bind_addr)?
    .run()
    .await
}
