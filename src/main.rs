use crate::config::config::Config;
use crate::config::session_auth::Session;
use crate::model::response::{HealthResponse, PageContext};
use crate::repository::database::Database;
use crate::repository::{CredentialStore, LeagueRepository};
use crate::view::html::HtmlRenderer;
use crate::view::Renderer;
use actix_web::http::StatusCode;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::info;
use std::io;
use std::sync::Arc;

mod config;
mod controller;
mod model;
mod repository;
mod service;
mod util;
mod view;

#[get("/health")]
async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "Success".to_string(),
        message: "Everything is working as expected".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let context = PageContext::<()>::new("Not found", session.identity());
    controller::handler::render_page(&data, StatusCode::NOT_FOUND, view::NOT_FOUND, context)
}

/// Everything a request handler needs, built once at startup.
pub struct AppState {
    credentials: Arc<dyn CredentialStore>,
    league: Arc<dyn LeagueRepository>,
    renderer: Arc<dyn Renderer>,
    config: Config,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = log4rs::init_file("./log-config.yml", Default::default()) {
        eprintln!("Log config file could not be loaded, logging is disabled: {e}");
    }

    let config = Config::init().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let db = Arc::new(
        Database::new(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
    );
    let bind_address = (config.host.clone(), config.port);

    let app_data = web::Data::new(AppState {
        credentials: db.clone(),
        league: db,
        renderer: Arc::new(HtmlRenderer),
        config,
    });

    info!("Listening on {}:{}", bind_address.0, bind_address.1);
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(controller::handler::config)
            .service(health_check)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind(bind_address)?
    .run()
    .await
}
