use crate::config::session_auth::{LoginRequired, Session};
use crate::model::response::{Notice, PageContext};
use crate::model::session::Identity;
use crate::model::user::{LoginUserSchema, RegisterUserSchema};
use crate::service::auth::{authenticate_user_service, register_user_service, AuthError};
use crate::service::league::{
    list_matches_service, list_players_service, list_stadiums_service, list_teams_service,
    Listing,
};
use crate::view::{self, RenderError};
use crate::AppState;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Form, Query};
use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

const DASHBOARD_PATH: &str = "/dashboard";
const INDEX_PATH: &str = "/";
const REGISTERED_PATH: &str = "/login?registered=true";

/// Renders `view` with `context`; a render failure is a 500.
pub fn render_page<T: Serialize>(
    data: &AppState,
    status: StatusCode,
    view: &str,
    context: PageContext<T>,
) -> HttpResponse {
    let rendered = serde_json::to_value(&context)
        .map_err(RenderError::from)
        .and_then(|ctx| data.renderer.render(view, &ctx));

    match rendered {
        Ok(markup) => HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(markup),
        Err(e) => {
            error!("Failed to render the {} view. The error: {:?}", view, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn redirect(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}

fn start_session(data: &AppState, identity: &Identity, location: &str) -> HttpResponse {
    match Session::establish(identity, &data.config) {
        Ok(cookie) => redirect(location).cookie(cookie).finish(),
        Err(e) => {
            error!("Could not sign the session token. The error: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn render_listing<T: Serialize>(
    data: &AppState,
    view: &str,
    title: &str,
    identity: &Identity,
    listing: Listing<T>,
) -> HttpResponse {
    let context = PageContext::new(title, Some(identity))
        .with_notice(listing.notice)
        .with_rows(listing.rows);
    render_page(data, StatusCode::OK, view, context)
}

#[get("/")]
async fn index_handler(data: Data<AppState>, session: Session) -> impl Responder {
    let context = PageContext::<()>::new("Dashboard", session.identity());
    render_page(&data, StatusCode::OK, view::DASHBOARD, context)
}

#[derive(Debug, Deserialize)]
struct LoginPageQuery {
    #[serde(default)]
    registered: bool,
}

#[get("/login")]
async fn login_form_handler(
    data: Data<AppState>,
    session: Session,
    query: Query<LoginPageQuery>,
) -> impl Responder {
    let notice = query
        .registered
        .then(|| Notice::success("Registration successful! Please login."));
    let context = PageContext::<()>::new("Log in", session.identity()).with_notice(notice);
    render_page(&data, StatusCode::OK, view::LOGIN, context)
}

#[post("/login")]
async fn login_user_handler(
    data: Data<AppState>,
    session: Session,
    login_user: Form<LoginUserSchema>,
) -> impl Responder {
    match authenticate_user_service(data.credentials.as_ref(), login_user.into_inner()).await {
        Ok(identity) => start_session(&data, &identity, DASHBOARD_PATH),
        Err(err) => {
            let status = match &err {
                AuthError::Store(_) | AuthError::Blocking(_) => {
                    error!("An error occurred in the login_user_handler. The error: {:?}", err);
                    StatusCode::SERVICE_UNAVAILABLE
                }
                AuthError::Password(_) => {
                    error!("Stored credentials could not be verified. The error: {:?}", err);
                    StatusCode::UNAUTHORIZED
                }
                _ => StatusCode::UNAUTHORIZED,
            };
            let message = if status == StatusCode::SERVICE_UNAVAILABLE {
                "Unable to log in right now, please try again later".to_string()
            } else {
                AuthError::InvalidCredentials.to_string()
            };
            let context = PageContext::<()>::new("Log in", session.identity())
                .with_notice(Some(Notice::error(message)));
            render_page(&data, status, view::LOGIN, context)
        }
    }
}

#[get("/guest-login")]
async fn guest_login_handler(data: Data<AppState>) -> impl Responder {
    info!("Guest session started");
    start_session(&data, &Identity::Guest, DASHBOARD_PATH)
}

#[get("/register")]
async fn register_form_handler(data: Data<AppState>, session: Session) -> impl Responder {
    let context = PageContext::<()>::new("Register", session.identity());
    render_page(&data, StatusCode::OK, view::REGISTER, context)
}

#[post("/register")]
async fn register_user_handler(
    data: Data<AppState>,
    session: Session,
    new_user: Form<RegisterUserSchema>,
) -> impl Responder {
    match register_user_service(data.credentials.as_ref(), new_user.into_inner()).await {
        Ok(_) => redirect(REGISTERED_PATH).finish(),
        Err(err) => {
            let (status, message) = match &err {
                AuthError::UsernameTaken => (StatusCode::CONFLICT, err.to_string()),
                AuthError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
                AuthError::Store(_) | AuthError::Blocking(_) => {
                    error!("An error occurred in the register_user_handler. The error: {:?}", err);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Unable to register right now, please try again later".to_string(),
                    )
                }
                _ => {
                    error!("An error occurred in the register_user_handler. The error: {:?}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An error occurred".to_string(),
                    )
                }
            };
            let context = PageContext::<()>::new("Register", session.identity())
                .with_notice(Some(Notice::error(message)));
            render_page(&data, status, view::REGISTER, context)
        }
    }
}

#[get("/logout")]
async fn logout_handler() -> impl Responder {
    redirect(INDEX_PATH).cookie(Session::clear()).finish()
}

#[get("/dashboard")]
async fn dashboard_handler(data: Data<AppState>, auth: LoginRequired) -> impl Responder {
    let context = PageContext::<()>::new("Dashboard", Some(&auth.identity));
    render_page(&data, StatusCode::OK, view::DASHBOARD, context)
}

#[get("/teams")]
async fn teams_handler(data: Data<AppState>, auth: LoginRequired) -> impl Responder {
    let listing = list_teams_service(data.league.as_ref()).await;
    render_listing(&data, view::TEAMS, "Teams", &auth.identity, listing)
}

#[get("/players")]
async fn players_handler(data: Data<AppState>, auth: LoginRequired) -> impl Responder {
    let listing = list_players_service(data.league.as_ref()).await;
    render_listing(&data, view::PLAYERS, "Players", &auth.identity, listing)
}

#[get("/matches")]
async fn matches_handler(data: Data<AppState>, auth: LoginRequired) -> impl Responder {
    let listing = list_matches_service(data.league.as_ref()).await;
    render_listing(&data, view::MATCHES, "Matches", &auth.identity, listing)
}

#[get("/stadiums")]
async fn stadiums_handler(data: Data<AppState>, auth: LoginRequired) -> impl Responder {
    let listing = list_stadiums_service(data.league.as_ref()).await;
    render_listing(&data, view::STADIUMS, "Stadiums", &auth.identity, listing)
}

pub fn config(conf: &mut web::ServiceConfig) {
    conf.service(index_handler)
        .service(login_form_handler)
        .service(login_user_handler)
        .service(guest_login_handler)
        .service(register_form_handler)
        .service(register_user_handler)
        .service(logout_handler)
        .service(dashboard_handler)
        .service(teams_handler)
        .service(players_handler)
        .service(matches_handler)
        .service(stadiums_handler);
}
